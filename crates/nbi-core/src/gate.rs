//! Submitter-state gate.
//!
//! A batch may only carry bridges of the state it was submitted under. The
//! first bridge with a different, non-blank state code rejects the whole
//! batch.

use nbi_model::{BridgeRecord, Entity, EntityKind, FailedRule, Severity, trimmed};
use nbi_validate::RuleInput;

pub const SUBMITTER_STATE_MISMATCH: &str = "SUBMITTER_STATE_MISMATCH";

const STATE_ITEM: &str = "BL01";

/// The sentinel failure for the first record whose state code differs from
/// the submitter's, or `None` when the batch passes. A blank submitter
/// state disables the gate.
pub fn check_submitter(submitter: Option<&str>, records: &[BridgeRecord]) -> Option<FailedRule> {
    let submitter = trimmed(submitter)?;
    let (record, state) = records.iter().find_map(|record| {
        record
            .value(STATE_ITEM)
            .filter(|state| !same_state(state, submitter))
            .map(|state| (record, state))
    })?;

    Some(FailedRule {
        rule: SUBMITTER_STATE_MISMATCH.to_string(),
        severity: Severity::Critical,
        item: STATE_ITEM.to_string(),
        field_name: EntityKind::Bridge
            .spec(STATE_ITEM)
            .map_or(STATE_ITEM, |spec| spec.name)
            .to_string(),
        dataset: EntityKind::Bridge.dataset_name().to_string(),
        fatal: true,
        description: format!("State code {state} does not match submitter state {submitter}"),
        origin: RuleInput::bridge(record).origin(STATE_ITEM),
    })
}

/// State codes compare numerically when both are numeric ("6" is "06").
fn same_state(a: &str, b: &str) -> bool {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.eq_ignore_ascii_case(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbi_model::RecordId;

    fn record(id: usize, state: Option<&str>) -> BridgeRecord {
        BridgeRecord {
            id: RecordId(id),
            state_code: state.map(str::to_string),
            bridge_number: Some(format!("B-{id}")),
            ..BridgeRecord::default()
        }
    }

    #[test]
    fn blank_states_pass_and_first_mismatch_is_reported() {
        let records = [
            record(0, Some("6")),
            record(1, None),
            record(2, Some(" ")),
            record(3, Some("32")),
            record(4, Some("04")),
        ];
        let failure = check_submitter(Some("06"), &records).expect("mismatch");
        assert_eq!(failure.rule, SUBMITTER_STATE_MISMATCH);
        assert_eq!(failure.origin.record, RecordId(3));
        assert!(failure.fatal);

        assert!(check_submitter(Some("06"), &records[..3]).is_none());
        assert!(check_submitter(None, &records).is_none());
        assert!(check_submitter(Some(""), &records).is_none());
    }
}
