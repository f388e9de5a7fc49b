// src/sheet/csv.rs

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// Read a delimited text export into raw rows. Exporters disagree on field
/// counts per row (preamble and trailer rows are ragged), so the reader is
/// headerless and flexible.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error at record {}", idx))?;
        // The exporters write a UTF-8 BOM; it would otherwise stick to the
        // first cell and break keyword matching.
        let row: Vec<String> = record
            .iter()
            .map(|cell| cell.trim_start_matches('\u{feff}').to_string())
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_ragged_rows_and_strips_bom() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"\xEF\xBB\xBFStatement export\nDate,Description,Amount\n01/03/2024,Coffee,12.5\n")?;
        tmp.flush()?;

        let rows = read_rows(tmp.path())?;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Statement export"]);
        assert_eq!(rows[1], vec!["Date", "Description", "Amount"]);
        assert_eq!(rows[2], vec!["01/03/2024", "Coffee", "12.5"]);
        Ok(())
    }
}
