//! Error types for submission ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a submission unusable as a whole.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Submission file not found.
    #[error("submission file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the submission file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not JSON at all.
    #[error("submission is not valid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// JSON of the wrong shape where an object was required.
    #[error("expected an object at {location}, found {found}")]
    NotAnObject {
        location: String,
        found: &'static str,
    },

    /// The top-level `bridges` array is absent.
    #[error("submission has no \"bridges\" array")]
    MissingBridges,

    /// A child collection that is neither an array nor null.
    #[error("expected an array at {location}, found {found}")]
    NotAnArray {
        location: String,
        found: &'static str,
    },

    /// A field holding an array or object instead of a scalar.
    #[error("item {item} at {location} holds {found}, expected a scalar")]
    NotAScalar {
        location: String,
        item: String,
        found: &'static str,
    },

    /// The bridge object could not be mapped onto a record.
    #[error("bridge {index} is malformed: {source}")]
    InvalidBridge {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
