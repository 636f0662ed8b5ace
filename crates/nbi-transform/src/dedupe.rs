//! Duplicate elimination.
//!
//! Records are grouped by bridge key and children by their natural key
//! within the owning record (routes within their feature). The first member
//! of a group is kept; later members are dropped and reported. Entities
//! whose key is entirely blank are never grouped.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use nbi_model::{BridgeKey, BridgeRecord, Entity, EntityKey, EntityKind, RecordId};

/// A dropped duplicate, identified by its owning bridge and its own key.
///
/// Field order gives the report order: state, county, bridge number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DuplicateEntry {
    pub state: String,
    pub county: String,
    pub bridge_number: String,
    pub key: EntityKey,
    /// Batch position of the record the duplicate was found in.
    pub record: RecordId,
}

/// Dropped duplicates per entity kind, for audit reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    removed: BTreeMap<EntityKind, Vec<DuplicateEntry>>,
}

impl DuplicateReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, kind: EntityKind) -> &[DuplicateEntry] {
        self.removed.get(&kind).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &[DuplicateEntry])> {
        self.removed
            .iter()
            .map(|(kind, entries)| (*kind, entries.as_slice()))
    }

    /// Number of dropped duplicates per kind, bridges first.
    pub fn counts(&self) -> Vec<(EntityKind, usize)> {
        self.iter()
            .map(|(kind, entries)| (kind, entries.len()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.removed.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    fn push(&mut self, entry: DuplicateEntry) {
        self.removed.entry(entry.key.kind).or_default().push(entry);
    }

    fn sort(&mut self) {
        for entries in self.removed.values_mut() {
            entries.sort();
        }
    }
}

/// Identity of the bridge a duplicate was found under.
struct Owner {
    key: BridgeKey,
    county: String,
    record: RecordId,
}

impl Owner {
    fn of(record: &BridgeRecord) -> Self {
        Self {
            key: record.key(),
            county: record.county().unwrap_or_default().to_string(),
            record: record.id,
        }
    }

    fn entry(&self, key: EntityKey) -> DuplicateEntry {
        DuplicateEntry {
            state: self.key.state.clone(),
            county: self.county.clone(),
            bridge_number: self.key.bridge_number.clone(),
            key,
            record: self.record,
        }
    }
}

/// Drop duplicate records, then duplicate children of each kept record.
pub fn dedupe_records(records: Vec<BridgeRecord>) -> (Vec<BridgeRecord>, DuplicateReport) {
    let mut report = DuplicateReport::new();
    let mut seen = BTreeSet::new();
    let mut kept = Vec::with_capacity(records.len());

    for mut record in records {
        let owner = Owner::of(&record);
        if !owner.key.is_blank() && !seen.insert(owner.key.clone()) {
            debug!(record = %record.id, key = %owner.key, "duplicate bridge dropped");
            report.push(owner.entry(record.entity_key()));
            continue;
        }
        dedupe_children(&mut record, &owner, &mut report);
        kept.push(record);
    }

    report.sort();
    info!(
        record_count = kept.len(),
        removed = report.total(),
        "deduplication complete"
    );
    (kept, report)
}

fn dedupe_children(record: &mut BridgeRecord, owner: &Owner, report: &mut DuplicateReport) {
    retain_first(&mut record.features, own_key, owner, report);
    for feature in &mut record.features {
        let mut routes = std::mem::take(&mut feature.routes);
        retain_first(
            &mut routes,
            |route| (!route.entity_key().is_blank()).then(|| feature.route_key(route)),
            owner,
            report,
        );
        feature.routes = routes;
    }
    retain_first(&mut record.elements, own_key, owner, report);
    retain_first(&mut record.inspections, own_key, owner, report);
    retain_first(&mut record.posting_evaluations, own_key, owner, report);
    retain_first(&mut record.posting_statuses, own_key, owner, report);
    retain_first(&mut record.span_sets, own_key, owner, report);
    retain_first(&mut record.substructure_sets, own_key, owner, report);
    retain_first(&mut record.work, own_key, owner, report);
}

fn own_key<T: Entity>(child: &T) -> Option<EntityKey> {
    Some(child.entity_key()).filter(|key| !key.is_blank())
}

/// Keep the first child per key. `key_of` returns `None` for children that
/// must not be grouped.
fn retain_first<T>(
    children: &mut Vec<T>,
    key_of: impl Fn(&T) -> Option<EntityKey>,
    owner: &Owner,
    report: &mut DuplicateReport,
) {
    let mut seen = BTreeSet::new();
    children.retain(|child| {
        let Some(key) = key_of(child) else {
            return true;
        };
        if seen.insert(key.clone()) {
            return true;
        }
        debug!(record = %owner.record, key = %key, "duplicate child dropped");
        report.push(owner.entry(key));
        false
    });
}
