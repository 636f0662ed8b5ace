//! Sanitization: the staging-safe twin of a record.
//!
//! Every scalar is rewritten to fit its declared [`FieldKind`]. Values that
//! cannot be salvaged are nulled, except element quantities, which fall back
//! to zero. Entities found in the fatal key set are kept but marked
//! [`RecordStatus::Removed`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use nbi_model::{
    BridgeKey, BridgeRecord, DecimalText, Entity, EntityKey, EntityKind, FatalKey, FatalKeys,
    FieldKind, RecordStatus, parse_date, trimmed,
};

/// What the sanitizer did to a value that did not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldChange {
    Nulled,
    Truncated,
    Zeroed,
}

/// Sanitizer changes for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeCounts {
    pub nulled: usize,
    pub truncated: usize,
    pub zeroed: usize,
    /// Entities marked removed.
    pub removed: usize,
}

impl ChangeCounts {
    fn record(&mut self, change: FieldChange) {
        match change {
            FieldChange::Nulled => self.nulled += 1,
            FieldChange::Truncated => self.truncated += 1,
            FieldChange::Zeroed => self.zeroed += 1,
        }
    }

    /// Values altered, not counting removals.
    pub fn changed(&self) -> usize {
        self.nulled + self.truncated + self.zeroed
    }
}

/// Per-kind counts of what sanitization changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeSummary {
    counts: BTreeMap<EntityKind, ChangeCounts>,
}

impl SanitizeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EntityKind) -> ChangeCounts {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, ChangeCounts)> + '_ {
        self.counts.iter().map(|(kind, counts)| (*kind, *counts))
    }

    pub fn total(&self) -> ChangeCounts {
        self.counts
            .values()
            .fold(ChangeCounts::default(), |acc, counts| ChangeCounts {
                nulled: acc.nulled + counts.nulled,
                truncated: acc.truncated + counts.truncated,
                zeroed: acc.zeroed + counts.zeroed,
                removed: acc.removed + counts.removed,
            })
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn entry(&mut self, kind: EntityKind) -> &mut ChangeCounts {
        self.counts.entry(kind).or_default()
    }
}

type Sanitized = (Option<String>, Option<FieldChange>);

/// Sanitize one value against its declared kind.
///
/// Returns the value to stage and, when the submitted value did not fit
/// as-is, what was done to it. Trimming and canonical numeric formatting
/// are not reported as changes.
pub fn sanitize_value(kind: FieldKind, value: Option<&str>) -> Sanitized {
    let value = trimmed(value);
    match kind {
        FieldKind::Text { max } => match value {
            Some(v) if v.chars().count() > max => (None, Some(FieldChange::Nulled)),
            other => (other.map(str::to_string), None),
        },
        FieldKind::Truncate { max } => match value {
            Some(v) if v.chars().count() > max => {
                let cut: String = v.chars().take(max).collect();
                let cut = cut.trim_end();
                let cut = (!cut.is_empty()).then(|| cut.to_string());
                (cut, Some(FieldChange::Truncated))
            }
            other => (other.map(str::to_string), None),
        },
        FieldKind::Numeric { digits, decimals } => numeric(value, digits, decimals),
        FieldKind::Quantity { digits } => quantity(value, digits),
        FieldKind::Date => match value {
            Some(v) if parse_date(v).is_none() => (None, Some(FieldChange::Nulled)),
            other => (other.map(str::to_string), None),
        },
    }
}

fn numeric(value: Option<&str>, digits: u8, decimals: u8) -> Sanitized {
    let Some(value) = value else {
        return (None, None);
    };
    let Some(decimal) = DecimalText::parse(value) else {
        return (None, Some(FieldChange::Nulled));
    };
    let decimals = usize::from(decimals);
    let integer_budget = usize::from(digits).saturating_sub(decimals);
    if decimal.integer_digits() > integer_budget {
        return (None, Some(FieldChange::Nulled));
    }
    let change = (decimal.decimal_digits() > decimals).then_some(FieldChange::Truncated);
    (Some(decimal.canonical(decimals)), change)
}

fn quantity(value: Option<&str>, digits: u8) -> Sanitized {
    const ZERO: &str = "0";
    let zeroed = || (Some(ZERO.to_string()), Some(FieldChange::Zeroed));

    let Some(decimal) = value.and_then(DecimalText::parse) else {
        return zeroed();
    };
    if decimal.is_zero() {
        return (Some(ZERO.to_string()), None);
    }
    if decimal.negative || decimal.integer_digits() > usize::from(digits) {
        return zeroed();
    }
    let whole = if decimal.integer.is_empty() {
        ZERO
    } else {
        decimal.integer
    };
    let change = decimal
        .fraction
        .bytes()
        .any(|b| b != b'0')
        .then_some(FieldChange::Truncated);
    (Some(whole.to_string()), change)
}

/// Fatal key lookups scoped to one bridge.
struct FatalScope<'a> {
    keys: &'a FatalKeys,
    bridge: BridgeKey,
}

impl FatalScope<'_> {
    fn removed(&self, entity: EntityKey) -> bool {
        self.keys.contains(&FatalKey::new(self.bridge.clone(), entity))
    }
}

/// Sanitize a record into a fresh twin.
pub fn sanitize_record(
    record: &BridgeRecord,
    fatal: &FatalKeys,
    summary: &mut SanitizeSummary,
) -> BridgeRecord {
    let mut target = record.empty_twin();
    sanitize_into(record, &mut target, fatal, summary);
    target
}

/// Sanitize `record` into `target`.
///
/// Every scalar of `target` is overwritten and every child collection is
/// rebuilt one-for-one with the source, so removed entities stay present.
pub fn sanitize_into(
    record: &BridgeRecord,
    target: &mut BridgeRecord,
    fatal: &FatalKeys,
    summary: &mut SanitizeSummary,
) {
    let scope = FatalScope {
        keys: fatal,
        bridge: fatal.bridge_key(record.id, &record.key()),
    };

    target.id = record.id;
    copy_fields(record, target, summary);
    let removed = scope.removed(record.entity_key());
    mark(target, removed, summary);

    target.features = record
        .features
        .iter()
        .map(|feature| {
            let mut out = sanitize_entity(feature, scope.removed(feature.entity_key()), summary);
            out.routes = feature
                .routes
                .iter()
                .map(|route| {
                    let removed = scope.removed(feature.route_key(route));
                    sanitize_entity(route, removed, summary)
                })
                .collect();
            out
        })
        .collect();
    target.elements = sanitize_children(&record.elements, &scope, summary);
    target.inspections = sanitize_children(&record.inspections, &scope, summary);
    target.posting_evaluations = sanitize_children(&record.posting_evaluations, &scope, summary);
    target.posting_statuses = sanitize_children(&record.posting_statuses, &scope, summary);
    target.span_sets = sanitize_children(&record.span_sets, &scope, summary);
    target.substructure_sets = sanitize_children(&record.substructure_sets, &scope, summary);
    target.work = sanitize_children(&record.work, &scope, summary);

    debug!(record = %record.id, removed, "record sanitized");
}

fn sanitize_children<T: Entity + Default>(
    children: &[T],
    scope: &FatalScope<'_>,
    summary: &mut SanitizeSummary,
) -> Vec<T> {
    children
        .iter()
        .map(|child| sanitize_entity(child, scope.removed(child.entity_key()), summary))
        .collect()
}

fn sanitize_entity<T: Entity + Default>(
    source: &T,
    removed: bool,
    summary: &mut SanitizeSummary,
) -> T {
    let mut target = T::default();
    copy_fields(source, &mut target, summary);
    mark(&mut target, removed, summary);
    target
}

fn copy_fields<T: Entity>(source: &T, target: &mut T, summary: &mut SanitizeSummary) {
    for spec in T::schema() {
        let (value, change) = sanitize_value(spec.kind, source.field(spec.item));
        target.set_field(spec.item, value);
        if let Some(change) = change {
            summary.entry(T::KIND).record(change);
        }
    }
}

fn mark<T: Entity>(target: &mut T, removed: bool, summary: &mut SanitizeSummary) {
    if removed {
        target.set_status(RecordStatus::Removed);
        summary.entry(T::KIND).removed += 1;
    } else {
        target.set_status(RecordStatus::Active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_kind(digits: u8, decimals: u8) -> FieldKind {
        FieldKind::Numeric { digits, decimals }
    }

    #[test]
    fn numeric_policy() {
        let kind = numeric_kind(4, 2);
        assert_eq!(
            sanitize_value(kind, Some("12.345")),
            (Some("12.34".into()), Some(FieldChange::Truncated))
        );
        assert_eq!(sanitize_value(kind, Some("+07.5")), (Some("7.5".into()), None));
        assert_eq!(
            sanitize_value(kind, Some("123.4")),
            (None, Some(FieldChange::Nulled))
        );
        assert_eq!(sanitize_value(kind, Some("abc")), (None, Some(FieldChange::Nulled)));
        assert_eq!(sanitize_value(kind, Some("  ")), (None, None));
    }

    #[test]
    fn quantity_policy() {
        let kind = FieldKind::Quantity { digits: 3 };
        assert_eq!(
            sanitize_value(kind, None),
            (Some("0".into()), Some(FieldChange::Zeroed))
        );
        assert_eq!(
            sanitize_value(kind, Some("-4")),
            (Some("0".into()), Some(FieldChange::Zeroed))
        );
        assert_eq!(
            sanitize_value(kind, Some("1000")),
            (Some("0".into()), Some(FieldChange::Zeroed))
        );
        assert_eq!(
            sanitize_value(kind, Some("12.9")),
            (Some("12".into()), Some(FieldChange::Truncated))
        );
        assert_eq!(sanitize_value(kind, Some("-0")), (Some("0".into()), None));
        assert_eq!(sanitize_value(kind, Some("042")), (Some("42".into()), None));
    }

    #[test]
    fn text_and_date_policy() {
        assert_eq!(
            sanitize_value(FieldKind::Text { max: 3 }, Some(" abcd ")),
            (None, Some(FieldChange::Nulled))
        );
        assert_eq!(
            sanitize_value(FieldKind::Text { max: 3 }, Some(" abc ")),
            (Some("abc".into()), None)
        );
        assert_eq!(
            sanitize_value(FieldKind::Truncate { max: 4 }, Some("Main Street")),
            (Some("Main".into()), Some(FieldChange::Truncated))
        );
        assert_eq!(
            sanitize_value(FieldKind::Date, Some("20230231")),
            (None, Some(FieldChange::Nulled))
        );
        assert_eq!(
            sanitize_value(FieldKind::Date, Some("20230228")),
            (Some("20230228".into()), None)
        );
    }
}
