// src/process/coerce.rs

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::schema::{CanonicalField, CanonicalRecord, TRAILER_MARKER};

/// Date layouts the exporters have been seen to emit. Day-first forms come
/// ahead of ISO, and the two-digit-year form ahead of the four-digit one so
/// `%Y` cannot swallow a two-digit year as year 23.
const DATE_FORMATS: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Day-first free-text date parse. `None` for anything unparseable; a bad
/// cell never fails the row.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let v = raw.trim().trim_matches('"');
    if v.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(v, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(v, fmt) {
            return Some(dt.date());
        }
    }
    debug!(value = %v, "unparseable date, coerced to null");
    None
}

/// Strip the currency symbol and thousands separators, then parse. Returns
/// 0.0 for anything that still fails; the amount column is total.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned = raw.replace('₪', "").replace(',', "");
    match cleaned.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            if !raw.trim().is_empty() {
                debug!(value = %raw, "unparseable amount, coerced to 0.0");
            }
            0.0
        }
    }
}

/// Keep the last four characters of an over-long card field. Four-character
/// values pass verbatim; shorter ones too, never padded.
pub fn card_last4(raw: &str) -> String {
    let v = raw.trim();
    let count = v.chars().count();
    if count > 4 {
        v.chars().skip(count - 4).collect()
    } else {
        v.to_string()
    }
}

fn text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Coerce one data row into a canonical record. A canonical field with no
/// source column, or a row too short to reach it, coerces from the empty
/// cell, so the record is always fully populated.
pub fn coerce_row(row: &[String], columns: &HashMap<CanonicalField, usize>) -> CanonicalRecord {
    let cell = |field: CanonicalField| -> &str {
        columns
            .get(&field)
            .and_then(|&idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    };

    CanonicalRecord {
        txn_date: parse_date(cell(CanonicalField::TransactionDate)),
        merchant: text(cell(CanonicalField::MerchantName)),
        card_last4: card_last4(cell(CanonicalField::CardLast4)),
        amount: parse_amount(cell(CanonicalField::Amount)),
        charge_date: parse_date(cell(CanonicalField::ChargeDate)),
        txn_type: text(cell(CanonicalField::TransactionType)),
    }
}

/// The exporter appends a per-sheet totals row; to the reader it looks like
/// data, but it is not a transaction.
pub fn is_trailer(record: &CanonicalRecord) -> bool {
    record.merchant == TRAILER_MARKER
}
