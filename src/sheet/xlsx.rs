// src/sheet/xlsx.rs

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, DataType, Reader};

/// Read the first worksheet of a workbook into raw text rows.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no worksheets"))?
        .context("reading first worksheet")?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Ok(rows)
}

/// Render one cell to the text form the coercer expects: dates day-first,
/// integral floats without a trailing `.0` so card digits survive as-is.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_render_without_decimal_point() {
        assert_eq!(cell_text(&Data::Float(5678.0)), "5678");
        assert_eq!(cell_text(&Data::Float(12.5)), "12.5");
    }

    #[test]
    fn empty_and_string_cells_pass_through() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("קפה".into())), "קפה");
        assert_eq!(cell_text(&Data::Int(12)), "12");
    }
}
