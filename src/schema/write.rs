// src/schema/write.rs

use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;

use super::types::{CanonicalField, CanonicalRecord};

/// UTF-8 byte-order marker. Spreadsheet tools use it to pick the right
/// decoding for the Hebrew headers.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Write the merged dataset as a BOM-prefixed UTF-8 CSV: the six canonical
/// columns in fixed order, dates as `YYYY-MM-DD` (empty when absent),
/// amounts as plain decimals.
pub fn write_dataset(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating output file {}", path.display()))?;
    file.write_all(UTF8_BOM).context("writing UTF-8 BOM")?;

    let mut wtr = WriterBuilder::new().from_writer(file);
    wtr.write_record(CanonicalField::ALL.iter().map(|f| f.label()))
        .context("writing canonical header row")?;

    for rec in records {
        wtr.write_record(&[
            format_date(rec.txn_date),
            rec.merchant.clone(),
            rec.card_last4.clone(),
            rec.amount.to_string(),
            format_date(rec.charge_date),
            rec.txn_type.clone(),
        ])
        .context("writing transaction row")?;
    }

    wtr.flush().context("flushing output file")?;
    Ok(())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
