// src/process/header.rs

use tracing::debug;

/// Keywords the exporters use in their header rows, in both languages the
/// sources ship. A row qualifies as a header when at least two of these
/// appear somewhere in it.
const HEADER_KEYWORDS: &[&str] = &[
    "date",
    "description",
    "card",
    "amount",
    "charge",
    "type",
    "תאריך",
    "בית",
    "עסק",
    "סכום",
    "כרטיס",
    "חיוב",
    "סוג",
];

/// How many leading rows to scan before giving up.
pub const SCAN_WINDOW: usize = 20;

/// Minimum keyword hits for a row to qualify. Ordinary data rows rarely
/// contain two of these at once, while a title row often contains one.
const MIN_HITS: usize = 2;

/// Scan the first `min(20, len)` rows top-down and return the index of the
/// first row containing at least two of the bilingual keywords as
/// case-insensitive substrings. `None` means no header was found in the
/// window; the caller decides whether that is fatal for the file.
pub fn detect_header_row(rows: &[Vec<String>]) -> Option<usize> {
    for (idx, row) in rows.iter().take(SCAN_WINDOW).enumerate() {
        let cells: Vec<String> = row.iter().map(|c| c.trim().to_lowercase()).collect();
        let hits = HEADER_KEYWORDS
            .iter()
            .filter(|kw| cells.iter().any(|cell| cell.contains(*kw)))
            .count();
        if hits >= MIN_HITS {
            debug!(row = idx, hits, "header row detected");
            return Some(idx);
        }
    }
    debug!(
        scanned = rows.len().min(SCAN_WINDOW),
        "no header row in scan window"
    );
    None
}
