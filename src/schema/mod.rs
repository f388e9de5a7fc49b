pub mod rules;
pub mod types;
pub mod write;

pub use rules::{RenameRule, RENAME_RULES, TRAILER_MARKER};
pub use types::{CanonicalField, CanonicalRecord};
pub use write::write_dataset;
