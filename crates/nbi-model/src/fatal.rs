//! Fatal keys: entities that must be excluded from staging.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::keys::{BridgeKey, EntityKey, RecordId};

/// Prefix of synthetic bridge numbers given to blank-identity records.
pub const FALLBACK_PREFIX: &str = "UNIDENTIFIED-";

/// An entity's natural key scoped by its owning bridge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FatalKey {
    pub bridge: BridgeKey,
    pub entity: EntityKey,
}

impl FatalKey {
    pub fn new(bridge: BridgeKey, entity: EntityKey) -> Self {
        Self { bridge, entity }
    }
}

/// Per-type sets of fatal keys plus the fallback registry for records
/// submitted without any identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatalKeys {
    sets: BTreeMap<EntityKind, BTreeSet<FatalKey>>,
    fallback: BTreeMap<RecordId, String>,
}

impl FatalKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key to its type's set. Returns true if it was not present.
    pub fn insert(&mut self, key: FatalKey) -> bool {
        self.sets.entry(key.entity.kind).or_default().insert(key)
    }

    pub fn contains(&self, key: &FatalKey) -> bool {
        self.sets
            .get(&key.entity.kind)
            .is_some_and(|set| set.contains(key))
    }

    pub fn keys(&self, kind: EntityKind) -> impl Iterator<Item = &FatalKey> {
        self.sets.get(&kind).into_iter().flatten()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.sets.get(&kind).map_or(0, BTreeSet::len)
    }

    pub fn len(&self) -> usize {
        self.sets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bridge key used for fatal bookkeeping, registering a synthetic one
    /// when both identity fields are blank.
    ///
    /// The synthetic id is keyed by the record's own [`RecordId`], so two
    /// distinct blank records never share a key and the same record always
    /// gets the same one.
    pub fn register_bridge(&mut self, record: RecordId, key: &BridgeKey) -> BridgeKey {
        if !key.is_blank() {
            return key.clone();
        }
        let next = self.fallback.len() + 1;
        let synthetic = self
            .fallback
            .entry(record)
            .or_insert_with(|| format!("{FALLBACK_PREFIX}{next:05}"));
        BridgeKey {
            state: String::new(),
            bridge_number: synthetic.clone(),
        }
    }

    /// Read-only counterpart of [`Self::register_bridge`]. A blank record
    /// that was never registered keeps its blank key.
    pub fn bridge_key(&self, record: RecordId, key: &BridgeKey) -> BridgeKey {
        if !key.is_blank() {
            return key.clone();
        }
        match self.fallback.get(&record) {
            Some(synthetic) => BridgeKey {
                state: String::new(),
                bridge_number: synthetic.clone(),
            },
            None => key.clone(),
        }
    }

    pub fn fallback_ids(&self) -> &BTreeMap<RecordId, String> {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_records_get_distinct_stable_ids() {
        let mut keys = FatalKeys::new();
        let blank = BridgeKey::default();
        let first = keys.register_bridge(RecordId(3), &blank);
        let second = keys.register_bridge(RecordId(7), &blank);
        let again = keys.register_bridge(RecordId(3), &blank);

        assert_ne!(first, second);
        assert_eq!(first, again);
        assert_eq!(first.bridge_number, "UNIDENTIFIED-00001");
        assert_eq!(keys.bridge_key(RecordId(7), &blank), second);
        assert_eq!(keys.bridge_key(RecordId(9), &blank), blank);
    }

    #[test]
    fn contains_is_scoped_by_type_and_bridge() {
        let mut keys = FatalKeys::new();
        let bridge = BridgeKey::new(Some("06"), Some("B1"));
        let other = BridgeKey::new(Some("06"), Some("B2"));
        let work = EntityKey::new(EntityKind::Work, ["1999"]);
        assert!(keys.insert(FatalKey::new(bridge.clone(), work.clone())));
        assert!(!keys.insert(FatalKey::new(bridge.clone(), work.clone())));

        assert!(keys.contains(&FatalKey::new(bridge, work.clone())));
        assert!(!keys.contains(&FatalKey::new(other, work)));
        assert_eq!(keys.count(EntityKind::Work), 1);
        assert_eq!(keys.count(EntityKind::Element), 0);
    }
}
