// src/schema/rules.rs

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::CanonicalField;

/// Exact phrase the exporter puts in the merchant column of its per-sheet
/// totals row. Rows carrying it are summaries, not transactions.
pub const TRAILER_MARKER: &str = "סה\"כ עסקאות בגיליון זה:";

/// One header rename rule. Rules are evaluated in declaration order and the
/// first match wins, so specific phrases must stay above bare prefixes.
pub struct RenameRule {
    pub pattern: Regex,
    pub target: CanonicalField,
}

fn rule(pattern: &str, target: CanonicalField) -> RenameRule {
    RenameRule {
        pattern: Regex::new(pattern).expect("invalid rename pattern"),
        target,
    }
}

/// Priority-ordered rename table mapping raw header text (already trimmed,
/// line breaks collapsed to spaces) onto canonical fields. Covers the
/// English exporter names and the Hebrew variants seen in the wild,
/// including labels the exporter wraps across lines.
pub static RENAME_RULES: Lazy<Vec<RenameRule>> = Lazy::new(|| {
    vec![
        // English names
        rule(r"(?i)^date$", CanonicalField::TransactionDate),
        rule(r"(?i)^description$", CanonicalField::MerchantName),
        rule(r"(?i)^card$", CanonicalField::CardLast4),
        rule(r"(?i)^amount$", CanonicalField::Amount),
        rule(r"(?i)^charge\s*date$", CanonicalField::ChargeDate),
        rule(r"(?i)^type$", CanonicalField::TransactionType),
        // Hebrew names and variations
        rule(r"(?i)^תאריך\s*עסקה$", CanonicalField::TransactionDate),
        rule(r"(?i)^תאריך\s*$", CanonicalField::TransactionDate),
        rule(r"(?i)^שם\s*בית\s*ה?עסק$", CanonicalField::MerchantName),
        rule(r"(?i)^כרטיס$", CanonicalField::CardLast4),
        rule(r#"(?i)^סכום\s*בש[״"]?ח$"#, CanonicalField::Amount),
        rule(r"(?i)^סכום\b", CanonicalField::Amount),
        rule(r"(?i)^מועד\s*חיוב$", CanonicalField::ChargeDate),
        rule(r"(?i)^מועד\b", CanonicalField::ChargeDate),
        rule(r"(?i)^סוג\s*עסקה$", CanonicalField::TransactionType),
    ]
});
