// src/process/standardize.rs

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::schema::{CanonicalField, RENAME_RULES};

/// Trim a header cell and collapse embedded line breaks (with surrounding
/// whitespace runs) to single spaces. Exporters wrap long labels across
/// lines inside one cell.
pub fn clean_header_cell(raw: &str) -> String {
    static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[\r\n]+\s*").unwrap());
    LINE_BREAKS.replace_all(raw, " ").trim().to_string()
}

/// Rename one cleaned header cell via the priority-ordered rule table. The
/// first matching rule wins. An unmatched cell keeps its original name and
/// is dropped at projection, so the return is `None` here.
pub fn rename_header(cleaned: &str) -> Option<CanonicalField> {
    RENAME_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(cleaned))
        .map(|rule| rule.target)
}

/// Map each canonical field to the index of the source column feeding it.
/// When several source columns rename to the same canonical field, the
/// first occurrence wins and the rest are dropped. Canonical fields with no
/// source column stay absent; the coercer fills them with typed defaults,
/// which completes the fixed six-field projection.
pub fn standardize_columns(header: &[String]) -> HashMap<CanonicalField, usize> {
    let mut mapping: HashMap<CanonicalField, usize> = HashMap::new();
    for (idx, raw) in header.iter().enumerate() {
        let cleaned = clean_header_cell(raw);
        match rename_header(&cleaned) {
            Some(field) => {
                if mapping.contains_key(&field) {
                    warn!(
                        column = idx,
                        header = %cleaned,
                        field = ?field,
                        "duplicate canonical column, keeping the first"
                    );
                } else {
                    debug!(column = idx, header = %cleaned, field = ?field, "column renamed");
                    mapping.insert(field, idx);
                }
            }
            None => {
                debug!(column = idx, header = %cleaned, "no rename rule matched, column dropped")
            }
        }
    }
    mapping
}
