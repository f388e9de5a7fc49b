// src/report.rs

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::merge::DatasetSummary;

/// Outcome of one input file, as recorded in the run report.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Processed { file: String, rows: usize },
    Failed { file: String, error: String },
}

/// Per-file outcomes plus the dataset overview, written next to the output
/// file after every run. `summary` is absent when no file produced rows.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub files: Vec<FileOutcome>,
    pub summary: Option<DatasetSummary>,
}

impl RunReport {
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing run report")?;
        fs::write(path, json)
            .with_context(|| format!("writing run report {}", path.display()))?;
        Ok(())
    }
}
