// src/sheet/mod.rs

pub mod csv;
pub mod xlsx;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// An ordered grid of untyped cell text, exactly as the exporter laid it
/// out. No header row is assumed; locating one is the processor's job.
#[derive(Debug)]
pub struct RawSheet {
    /// Source path, kept for diagnostics.
    pub source: PathBuf,
    /// Every row of the sheet, top to bottom, cells in column order.
    pub rows: Vec<Vec<String>>,
}

/// Read one spreadsheet into memory, dispatching on the file extension.
/// `.xlsx` and `.xls` go through the workbook reader; anything else is
/// treated as delimited text.
#[tracing::instrument(level = "info", skip(path), fields(file = %path.as_ref().display()))]
pub fn load_sheet<P: AsRef<Path>>(path: P) -> Result<RawSheet> {
    let path = path.as_ref();
    let rows = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls") => {
            xlsx::read_rows(path)
                .with_context(|| format!("reading workbook {}", path.display()))?
        }
        _ => csv::read_rows(path).with_context(|| format!("reading CSV {}", path.display()))?,
    };
    debug!(rows = rows.len(), "sheet loaded");
    Ok(RawSheet {
        source: path.to_path_buf(),
        rows,
    })
}
