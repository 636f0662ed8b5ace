//! Submission loading.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use nbi_model::{BridgeRecord, EntityKind, RecordId};

use crate::error::{IngestError, Result};
use crate::normalize::{describe, normalize_entity, scalar_text};

/// One submitted batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submission {
    /// State code the batch was submitted under, when declared.
    pub submitter_state: Option<String>,
    /// Bridges in submission order; each carries its position as its
    /// [`RecordId`].
    pub bridges: Vec<BridgeRecord>,
}

impl Submission {
    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }
}

/// Read and parse a submission file.
pub fn read_submission(path: &Path) -> Result<Submission> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let submission = parse_submission(&text)?;
    info!(
        path = %path.display(),
        record_count = submission.len(),
        submitter_state = submission.submitter_state.as_deref().unwrap_or(""),
        "submission loaded"
    );
    Ok(submission)
}

/// Parse submission text.
///
/// Unknown items are ignored with a warning. Structural problems (wrong
/// JSON types where objects, arrays or scalars are expected) reject the
/// whole submission.
pub fn parse_submission(text: &str) -> Result<Submission> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| IngestError::Json { source })?;
    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(IngestError::NotAnObject {
                location: "$".to_string(),
                found: describe(&other),
            });
        }
    };

    let submitter_state = match root.remove("submitter_state") {
        Some(value) => scalar_text(&value, "$", "submitter_state")?,
        None => None,
    };
    let items = match root.remove("bridges") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Err(IngestError::MissingBridges),
        Some(other) => {
            return Err(IngestError::NotAnArray {
                location: "$.bridges".to_string(),
                found: describe(&other),
            });
        }
    };
    for key in root.keys() {
        debug!(key = %key, "ignoring top-level key");
    }

    let mut dropped = Vec::new();
    let mut bridges = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let location = format!("$.bridges[{index}]");
        let mut object = match item {
            Value::Object(object) => object,
            other => {
                return Err(IngestError::NotAnObject {
                    location,
                    found: describe(&other),
                });
            }
        };
        normalize_entity(&mut object, EntityKind::Bridge, &location, &mut dropped)?;
        let mut record: BridgeRecord = serde_json::from_value(Value::Object(object))
            .map_err(|source| IngestError::InvalidBridge { index, source })?;
        record.id = RecordId(index);
        bridges.push(record);
    }

    if let Some(first) = dropped.first() {
        warn!(count = dropped.len(), first = %first, "unknown items ignored");
    }
    Ok(Submission {
        submitter_state,
        bridges,
    })
}
