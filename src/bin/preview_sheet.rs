// src/bin/preview_sheet.rs
//
// Print the leading rows of one statement export and where the header row
// was detected. Handy when a new issuer's layout refuses to parse.

use anyhow::{bail, Result};
use stmtmerge::{process::header::detect_header_row, sheet};

fn main() -> Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: preview_sheet <statement.xlsx|statement.csv>");
    };

    let sheet = sheet::load_sheet(&path)?;
    for (idx, row) in sheet.rows.iter().take(10).enumerate() {
        println!("{:>3}: {:?}", idx, row);
    }

    match detect_header_row(&sheet.rows) {
        Some(idx) => println!("header detected at row {}", idx),
        None => println!("no header detected in the first 20 rows"),
    }
    Ok(())
}
