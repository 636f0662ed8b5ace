//! Record-level transformations around rule evaluation.
//!
//! - [`dedupe`]: keeps the first record per bridge key and the first child
//!   per natural key, reporting what was dropped.
//! - [`sanitize`]: builds the type- and length-safe twin of a record and
//!   marks fatal entities as removed.

pub mod dedupe;
pub mod sanitize;

pub use dedupe::{DuplicateEntry, DuplicateReport, dedupe_records};
pub use sanitize::{
    ChangeCounts, FieldChange, SanitizeSummary, sanitize_into, sanitize_record, sanitize_value,
};
