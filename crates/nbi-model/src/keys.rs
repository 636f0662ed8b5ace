use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::EntityKind;

/// Position of a primary record in the ingested batch.
///
/// This is the record's own identity, independent of any submitted value,
/// and survives deduplication unchanged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RecordId(pub usize);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primary key of a bridge: (state code, bridge number).
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BridgeKey {
    pub state: String,
    pub bridge_number: String,
}

impl BridgeKey {
    pub fn new(state: Option<&str>, bridge_number: Option<&str>) -> Self {
        Self {
            state: state.map(str::trim).unwrap_or_default().to_string(),
            bridge_number: bridge_number.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    /// Both identity fields are empty.
    pub fn is_blank(&self) -> bool {
        self.state.is_empty() && self.bridge_number.is_empty()
    }
}

impl fmt::Display for BridgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.state, self.bridge_number)
    }
}

/// Composite natural key of any entity.
///
/// For child entities the parts are the child's own key fields; routes are
/// prefixed with their owning feature's type code. Bridge ownership is
/// tracked separately (see [`crate::FatalKey`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub parts: Vec<String>,
}

impl EntityKey {
    pub fn new<I, S>(kind: EntityKind, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kind,
            parts: parts
                .into_iter()
                .map(|part| part.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// Every part is empty.
    pub fn is_blank(&self) -> bool {
        self.parts.iter().all(String::is_empty)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.parts.join("|"))
    }
}
