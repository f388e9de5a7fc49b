// src/merge/mod.rs

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::schema::CanonicalRecord;

/// Marker reported when no row carries a parseable transaction date.
pub const NO_DATE: &str = "N/A";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Concatenate per-file results in processing order, then stable-sort by
/// transaction date with dateless rows last. Ties keep their pre-sort
/// position, so within-file ordering survives the merge. No row-level
/// deduplication happens here.
pub fn merge_records(per_file: Vec<Vec<CanonicalRecord>>) -> Vec<CanonicalRecord> {
    let mut merged: Vec<CanonicalRecord> = per_file.into_iter().flatten().collect();
    merged.sort_by_key(|r| (r.txn_date.is_none(), r.txn_date));
    merged
}

/// Run-level overview of the merged dataset.
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub total_transactions: usize,
    pub distinct_merchants: usize,
    pub total_amount: f64,
    pub first_transaction: String,
    pub last_transaction: String,
}

pub fn summarize(records: &[CanonicalRecord]) -> DatasetSummary {
    let distinct: HashSet<&str> = records.iter().map(|r| r.merchant.as_str()).collect();
    let total_amount = records.iter().map(|r| r.amount).sum();

    let dates: Vec<NaiveDate> = records.iter().filter_map(|r| r.txn_date).collect();
    let fmt = |d: &NaiveDate| d.format(DATE_FORMAT).to_string();

    DatasetSummary {
        total_transactions: records.len(),
        distinct_merchants: distinct.len(),
        total_amount,
        first_transaction: dates.iter().min().map(fmt).unwrap_or_else(|| NO_DATE.into()),
        last_transaction: dates.iter().max().map(fmt).unwrap_or_else(|| NO_DATE.into()),
    }
}
