//! The entity a rule is evaluated against, with its owners.

use nbi_model::{BridgeRecord, DynEntity, EntityKey, EntityKind, Feature, Origin, trimmed};

/// A primary record, or a child entity together with its owning record.
/// Features and routes also see the (owning) feature.
#[derive(Clone, Copy)]
pub struct RuleInput<'a> {
    pub entity: &'a dyn DynEntity,
    pub bridge: &'a BridgeRecord,
    pub feature: Option<&'a Feature>,
}

impl std::fmt::Debug for RuleInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleInput")
            .field("kind", &self.kind())
            .field("record", &self.bridge.id)
            .field("key", &self.key())
            .finish()
    }
}

impl<'a> RuleInput<'a> {
    pub fn bridge(bridge: &'a BridgeRecord) -> Self {
        Self {
            entity: bridge,
            bridge,
            feature: None,
        }
    }

    pub fn child(entity: &'a dyn DynEntity, bridge: &'a BridgeRecord) -> Self {
        Self {
            entity,
            bridge,
            feature: None,
        }
    }

    /// A feature sees itself as `feature` so rules can reach its routes.
    pub fn feature(feature: &'a Feature, bridge: &'a BridgeRecord) -> Self {
        Self {
            entity: feature,
            bridge,
            feature: Some(feature),
        }
    }

    pub fn route(
        entity: &'a dyn DynEntity,
        feature: &'a Feature,
        bridge: &'a BridgeRecord,
    ) -> Self {
        Self {
            entity,
            bridge,
            feature: Some(feature),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }

    /// Trimmed, non-blank value of one of the entity's own fields.
    pub fn value(&self, item: &str) -> Option<&'a str> {
        trimmed(self.entity.get(item))
    }

    /// Trimmed, non-blank value of an owning-record field.
    pub fn bridge_value(&self, item: &str) -> Option<&'a str> {
        trimmed(self.bridge.get(item))
    }

    /// Natural key; routes are prefixed with their feature's type code.
    pub fn key(&self) -> EntityKey {
        let mut parts = Vec::new();
        if self.kind() == EntityKind::Route
            && let Some(feature) = self.feature
        {
            parts.extend(feature.natural_key());
        }
        parts.extend(self.entity.natural_key());
        EntityKey::new(self.kind(), parts)
    }

    /// Items of the entity's schema that carry a value.
    pub fn populated_items(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kind()
            .schema()
            .iter()
            .filter(|spec| self.value(spec.item).is_some())
            .map(|spec| spec.item)
    }

    pub fn origin(&self, item: &str) -> Origin {
        Origin {
            kind: self.kind(),
            record: self.bridge.id,
            bridge: self.bridge.key(),
            county: self.bridge.county().map(str::to_string),
            key: self.key(),
            value: self.entity.get(item).map(str::to_string),
        }
    }
}
