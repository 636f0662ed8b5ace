//! Fatal key collection.
//!
//! A fatal failure on an identity item excludes the entity from staging.
//! Exclusion then flows downwards: a fatal bridge takes every child with
//! it, and a fatal feature takes its routes.

use std::collections::BTreeSet;

use tracing::{debug, info};

use nbi_model::{BridgeRecord, Entity, EntityKind, FailedRule, FatalKey, FatalKeys, RecordId};

/// Collect fatal keys from every failure of a batch.
///
/// Records submitted with neither state code nor bridge number get a
/// synthetic bridge key keyed by their [`RecordId`], so two blank records
/// stay distinct.
pub fn collect_fatal_keys(records: &[BridgeRecord], failures: &[FailedRule]) -> FatalKeys {
    let mut keys = FatalKeys::new();
    for failure in failures {
        let origin = &failure.origin;
        if !failure.is_fatal_on(origin.kind.key_items()) {
            continue;
        }
        let bridge = keys.register_bridge(origin.record, &origin.bridge);
        if keys.insert(FatalKey::new(bridge, origin.key.clone())) {
            debug!(
                rule = %failure.rule,
                record = %origin.record,
                key = %origin.key,
                "fatal key"
            );
        }
    }

    let direct = keys.len();
    for record in records {
        propagate(record, &mut keys);
    }
    info!(
        fatal = direct,
        propagated = keys.len() - direct,
        fallback_ids = keys.fallback_ids().len(),
        "fatal keys collected"
    );
    keys
}

/// Fatal key of a primary record.
pub fn bridge_fatal_key(keys: &FatalKeys, record: &BridgeRecord) -> FatalKey {
    FatalKey::new(keys.bridge_key(record.id, &record.key()), record.entity_key())
}

fn propagate(record: &BridgeRecord, keys: &mut FatalKeys) {
    let bridge = keys.bridge_key(record.id, &record.key());
    if keys.contains(&bridge_fatal_key(keys, record)) {
        for child in record.child_keys() {
            keys.insert(FatalKey::new(bridge.clone(), child));
        }
        return;
    }

    for feature in &record.features {
        let feature_key = FatalKey::new(bridge.clone(), feature.entity_key());
        if keys.contains(&feature_key) {
            for route in &feature.routes {
                keys.insert(FatalKey::new(bridge.clone(), feature.route_key(route)));
            }
        }
    }
}

/// Distinct records with at least one fatal key.
pub fn affected_records(records: &[BridgeRecord], keys: &FatalKeys) -> BTreeSet<RecordId> {
    records
        .iter()
        .filter(|record| {
            let bridge = keys.bridge_key(record.id, &record.key());
            keys.contains(&bridge_fatal_key(keys, record))
                || record
                    .child_keys()
                    .into_iter()
                    .any(|child| keys.contains(&FatalKey::new(bridge.clone(), child)))
        })
        .map(|record| record.id)
        .collect()
}

/// Count of fatal keys per dataset, bridges first.
pub fn fatal_counts(keys: &FatalKeys) -> Vec<(EntityKind, usize)> {
    EntityKind::all()
        .iter()
        .map(|&kind| (kind, keys.count(kind)))
        .filter(|(_, count)| *count > 0)
        .collect()
}
