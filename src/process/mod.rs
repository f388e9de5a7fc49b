// src/process/mod.rs

pub mod coerce;
pub mod header;
pub mod standardize;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::schema::CanonicalRecord;
use crate::sheet::RawSheet;

/// How many leading rows to quote in the "no header" diagnostic.
const SAMPLE_ROWS: usize = 5;

/// Run the full per-file pipeline on one raw sheet: locate the header row,
/// standardize the columns, coerce every data row, drop trailer rows. An
/// `Err` means the whole file is excluded; the caller logs it and moves on
/// to the next file.
#[tracing::instrument(level = "info", skip(sheet), fields(file = %sheet.source.display()))]
pub fn clean_sheet(sheet: &RawSheet) -> Result<Vec<CanonicalRecord>> {
    let header_idx = header::detect_header_row(&sheet.rows).ok_or_else(|| {
        anyhow!(
            "no header row in the first {} rows; leading rows: {:?}",
            sheet.rows.len().min(header::SCAN_WINDOW),
            &sheet.rows[..sheet.rows.len().min(SAMPLE_ROWS)]
        )
    })?;

    let columns = standardize::standardize_columns(&sheet.rows[header_idx]);
    if columns.is_empty() {
        warn!(row = header_idx, "header row matched no canonical columns");
    }

    let data_rows = &sheet.rows[header_idx + 1..];
    let mut records = Vec::with_capacity(data_rows.len());
    let mut trailers = 0usize;
    for row in data_rows {
        let record = coerce::coerce_row(row, &columns);
        if coerce::is_trailer(&record) {
            trailers += 1;
            continue;
        }
        records.push(record);
    }

    info!(
        header_row = header_idx,
        rows = records.len(),
        trailers,
        "sheet cleaned"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TRAILER_MARKER;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,stmtmerge::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn sheet(name: &str, rows: &[&[&str]]) -> RawSheet {
        RawSheet {
            source: PathBuf::from(name),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn cleans_a_bilingual_export_with_preamble_and_trailer() -> Result<()> {
        init_test_logging();
        let sheet = sheet(
            "export.xlsx",
            &[
                &["פירוט עסקאות"],
                &[""],
                &["תאריך עסקה", "שם בית העסק", "כרטיס", "סכום בש\"ח", "מועד חיוב", "סוג עסקה"],
                &["01/03/2024", "קפה גרג", "1234567", "₪42.5", "10/03/2024", "רגילה"],
                &["02/03/2024", "סופר", "1234567", "1,234.56", "10/03/2024", "תשלומים"],
                &["", TRAILER_MARKER, "", "1277.06", "", ""],
            ],
        );

        let records = clean_sheet(&sheet)?;
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.txn_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(first.merchant, "קפה גרג");
        assert_eq!(first.card_last4, "4567");
        assert_eq!(first.amount, 42.5);
        assert_eq!(first.charge_date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(first.txn_type, "רגילה");

        assert_eq!(records[1].amount, 1234.56);
        Ok(())
    }

    #[test]
    fn file_without_header_is_an_error_not_a_panic() {
        init_test_logging();
        let sheet = sheet("broken.csv", &[&["1", "2"], &["3", "4"]]);
        let err = clean_sheet(&sheet).unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }

    #[test]
    fn malformed_file_is_skipped_and_the_rest_still_merge() -> Result<()> {
        init_test_logging();
        let dir = tempfile::tempdir()?;

        let good = dir.path().join("good.csv");
        std::fs::write(
            &good,
            "export preamble\nDate,Description,Amount\n01/03/2024,Coffee,12.5\n",
        )?;
        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "1,2,3\n4,5,6\n")?;

        let mut per_file = Vec::new();
        for path in [&bad, &good] {
            if let Ok(records) = crate::sheet::load_sheet(path).and_then(|s| clean_sheet(&s)) {
                per_file.push(records);
            }
        }

        let merged = crate::merge::merge_records(per_file);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].merchant, "Coffee");

        let out = dir.path().join("merged.csv");
        crate::schema::write_dataset(&out, &merged)?;
        let bytes = std::fs::read(&out)?;
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        Ok(())
    }

    #[test]
    fn english_export_round_trips_through_the_same_pipeline() -> Result<()> {
        let sheet = sheet(
            "export.csv",
            &[
                &["Date", "Description", "Card", "Amount", "Charge Date", "Type"],
                &["05/01/2024", "Grocer", "9876", "88.0", "15/01/2024", "regular"],
            ],
        );

        let records = clean_sheet(&sheet)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].merchant, "Grocer");
        assert_eq!(records[0].card_last4, "9876");
        assert_eq!(records[0].txn_date, NaiveDate::from_ymd_opt(2024, 1, 5));
        Ok(())
    }
}
