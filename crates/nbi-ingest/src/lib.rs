//! Bridge inventory submission ingestion.
//!
//! A submission is a JSON object carrying the submitting state and an array
//! of bridge objects keyed by item identifier. Loading rejects anything
//! structurally malformed before a record reaches validation. Scalars are
//! normalized to text so that numeric or boolean JSON values survive to the
//! rules and the sanitizer unchanged in meaning.

mod error;
mod normalize;
mod submission;

// === Error Types ===
pub use error::{IngestError, Result};

// === Submissions ===
pub use submission::{Submission, parse_submission, read_submission};
