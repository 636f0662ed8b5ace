//! Field schema shared by every entity type.

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{EntityKind, RecordStatus};
use crate::keys::EntityKey;

/// Declared storage type of a submitted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Alphanumeric, nulled when it exceeds `max` characters.
    Text { max: usize },
    /// Alphanumeric, cut to `max` characters.
    Truncate { max: usize },
    /// Decimal with a total-digit and decimal-place budget.
    Numeric { digits: u8, decimals: u8 },
    /// Element condition-state quantity: whole, non-negative, never null.
    Quantity { digits: u8 },
    /// Calendar date in fixed `YYYYMMDD` form.
    Date,
}

impl FieldKind {
    /// Maximum number of characters (text) or digits (numeric) the field holds.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Text { max } | Self::Truncate { max } => *max,
            Self::Numeric { digits, .. } | Self::Quantity { digits } => usize::from(*digits),
            Self::Date => 8,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. } | Self::Quantity { .. })
    }
}

/// One submitted field: item identifier, human name and declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub item: &'static str,
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(item: &'static str, name: &'static str, max: usize) -> Self {
        Self {
            item,
            name,
            kind: FieldKind::Text { max },
        }
    }

    pub const fn truncate(item: &'static str, name: &'static str, max: usize) -> Self {
        Self {
            item,
            name,
            kind: FieldKind::Truncate { max },
        }
    }

    pub const fn numeric(item: &'static str, name: &'static str, digits: u8, decimals: u8) -> Self {
        Self {
            item,
            name,
            kind: FieldKind::Numeric { digits, decimals },
        }
    }

    pub const fn quantity(item: &'static str, name: &'static str, digits: u8) -> Self {
        Self {
            item,
            name,
            kind: FieldKind::Quantity { digits },
        }
    }

    pub const fn date(item: &'static str, name: &'static str) -> Self {
        Self {
            item,
            name,
            kind: FieldKind::Date,
        }
    }
}

/// Common surface of the primary record and every child entity.
pub trait Entity {
    const KIND: EntityKind;

    /// Every scalar field this entity carries, in submission order.
    fn schema() -> &'static [FieldSpec];

    /// Raw submitted value of a field, `None` when absent or unknown.
    fn field(&self, item: &str) -> Option<&str>;

    /// Replace a field value. Returns `false` for an unknown item.
    fn set_field(&mut self, item: &str, value: Option<String>) -> bool;

    /// This entity's own natural-key parts (see [`crate::EntityKey`]).
    fn key_parts(&self) -> Vec<String>;

    fn status(&self) -> Option<RecordStatus>;

    fn set_status(&mut self, status: RecordStatus);

    /// Natural key of this entity on its own. Routes are keyed through
    /// their feature instead (see [`crate::Feature::route_key`]).
    fn entity_key(&self) -> EntityKey {
        EntityKey::new(Self::KIND, self.key_parts())
    }

    /// Trimmed, non-empty value of a field.
    fn value(&self, item: &str) -> Option<&str> {
        trimmed(self.field(item))
    }

    /// Schema entry for an item.
    fn spec(item: &str) -> Option<&'static FieldSpec> {
        Self::schema().iter().find(|spec| spec.item == item)
    }

    /// Items that carry a non-blank value.
    fn populated_items(&self) -> Vec<&'static str> {
        Self::schema()
            .iter()
            .filter(|spec| !is_blank(self.field(spec.item)))
            .map(|spec| spec.item)
            .collect()
    }
}

/// Object-safe view of any entity, for code that only reads fields.
pub trait DynEntity {
    fn kind(&self) -> EntityKind;

    fn get(&self, item: &str) -> Option<&str>;

    fn natural_key(&self) -> Vec<String>;
}

impl<T: Entity> DynEntity for T {
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    fn get(&self, item: &str) -> Option<&str> {
        self.field(item)
    }

    fn natural_key(&self) -> Vec<String> {
        self.key_parts()
    }
}

/// True when the value is absent or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Trim a value, mapping blank to `None`.
pub fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn key_part(value: Option<&String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Child collections arrive absent, `null` or as an array.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_helpers() {
        assert!(is_blank(None));
        assert!(is_blank(Some("  ")));
        assert!(!is_blank(Some(" x")));
        assert_eq!(trimmed(Some(" 12 ")), Some("12"));
        assert_eq!(trimmed(Some("")), None);
    }

    #[test]
    fn capacity_by_kind() {
        assert_eq!(FieldKind::Text { max: 15 }.capacity(), 15);
        assert_eq!(
            FieldKind::Numeric {
                digits: 4,
                decimals: 2
            }
            .capacity(),
            4
        );
        assert_eq!(FieldKind::Date.capacity(), 8);
    }
}
