use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, Severity};
use crate::keys::{BridgeKey, EntityKey, RecordId};

/// The entity a failed rule was evaluated against.
///
/// Carries enough identity for the fatal-key collector and for reporting to
/// cross-reference the submission without holding on to the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub kind: EntityKind,
    pub record: RecordId,
    pub bridge: BridgeKey,
    pub county: Option<String>,
    pub key: EntityKey,
    /// Submitted value of the rule's field, when the rule names one.
    pub value: Option<String>,
}

/// A rule whose predicate returned false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRule {
    pub rule: String,
    pub severity: Severity,
    /// Field identifier (e.g. "BID01").
    pub item: String,
    pub field_name: String,
    pub dataset: String,
    pub fatal: bool,
    pub description: String,
    pub origin: Origin,
}

impl FailedRule {
    /// Fatal failure on one of the entity's identity fields.
    pub fn is_fatal_on(&self, identity_items: &[&str]) -> bool {
        self.fatal && identity_items.contains(&self.item.as_str())
    }
}
