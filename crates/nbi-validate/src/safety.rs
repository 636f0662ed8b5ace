//! Safety cross-checks: load rating and condition combinations judged
//! against the bridge's most recent posting status.

use nbi_model::{BridgeRecord, EntityKind, FailedRule, Severity};

use crate::input::RuleInput;
use crate::rules::support::{date, field, number, rating};

/// Posting status of a closed bridge.
pub const CLOSED: &str = "K";
/// Posting status of a bridge open with no restriction.
pub const OPEN: &str = "A";

/// Operating factor below which an open bridge should be closed.
const CLOSE_THRESHOLD: f64 = 0.30;
/// Rating factor below which an unrestricted bridge should be posted.
const POST_THRESHOLD: f64 = 1.00;
/// Condition rating at or below which the component is critical.
const CRITICAL_RATING: u8 = 2;
/// Deck rating of a failed deck.
const FAILED_RATING: u8 = 0;

/// Returns the offending item when the combination is unsafe.
type SafetyPredicate = fn(&BridgeRecord, &str) -> Option<&'static str>;

/// One cross-check, run against the latest posting status.
#[derive(Debug, Clone, Copy)]
pub struct SafetyCheck {
    pub name: &'static str,
    pub description: &'static str,
    predicate: SafetyPredicate,
}

pub const SAFETY_CHECKS: &[SafetyCheck] = &[
    SafetyCheck {
        name: "SAFETY_OPERATING_CLOSE",
        description: "Operating load rating factor below 0.30 on a bridge that is not closed",
        predicate: operating_forces_closing,
    },
    SafetyCheck {
        name: "SAFETY_OPERATING_POST",
        description: "Operating load rating factor below 1.00 on an unrestricted bridge",
        predicate: operating_forces_posting,
    },
    SafetyCheck {
        name: "SAFETY_LEGAL_POST",
        description: "Controlling legal load rating factor below 1.00 on an unrestricted bridge",
        predicate: legal_forces_posting,
    },
    SafetyCheck {
        name: "SAFETY_CRITICAL_CONDITION",
        description: "Superstructure, substructure or culvert in critical condition while open",
        predicate: critical_component,
    },
    SafetyCheck {
        name: "SAFETY_FAILED_DECK",
        description: "Failed deck on a bridge that is not closed",
        predicate: failed_deck,
    },
];

/// Components whose rating at or below critical is unsafe on an open bridge.
const COMPONENT_RATINGS: &[&str] = &["BC02", "BC03", "BC04"];

/// Status code of the latest dated posting status.
///
/// Statuses without a parseable change date are ignored. With no dated
/// status, or a blank code on the latest one, the bridge is treated as
/// closed.
pub fn latest_posting_status(record: &BridgeRecord) -> String {
    record
        .posting_statuses
        .iter()
        .filter_map(|status| date(field(status, "BPS02")).map(|changed| (changed, status)))
        .max_by_key(|(changed, _)| *changed)
        .and_then(|(_, status)| field(status, "BPS01"))
        .map_or_else(|| CLOSED.to_string(), str::to_ascii_uppercase)
}

/// Run every cross-check against one record.
///
/// Each failure names the item that made the combination unsafe, so its
/// origin carries that item's value.
pub fn cross_check(record: &BridgeRecord) -> Vec<FailedRule> {
    let status = latest_posting_status(record);
    let input = RuleInput::bridge(record);
    SAFETY_CHECKS
        .iter()
        .filter_map(|check| (check.predicate)(record, &status).map(|item| (check, item)))
        .map(|(check, item)| FailedRule {
            rule: check.name.to_string(),
            severity: Severity::Safety,
            item: item.to_string(),
            field_name: EntityKind::Bridge
                .spec(item)
                .map_or(item, |spec| spec.name)
                .to_string(),
            dataset: EntityKind::Bridge.dataset_name().to_string(),
            fatal: false,
            description: check.description.to_string(),
            origin: input.origin(item),
        })
        .collect()
}

fn factor_below(
    record: &BridgeRecord,
    item: &'static str,
    threshold: f64,
) -> Option<&'static str> {
    number(field(record, item))
        .is_some_and(|factor| factor < threshold)
        .then_some(item)
}

fn operating_forces_closing(record: &BridgeRecord, status: &str) -> Option<&'static str> {
    if status == CLOSED {
        return None;
    }
    factor_below(record, "BLR06", CLOSE_THRESHOLD)
}

fn operating_forces_posting(record: &BridgeRecord, status: &str) -> Option<&'static str> {
    if status != OPEN {
        return None;
    }
    factor_below(record, "BLR06", POST_THRESHOLD)
}

fn legal_forces_posting(record: &BridgeRecord, status: &str) -> Option<&'static str> {
    if status != OPEN {
        return None;
    }
    factor_below(record, "BLR07", POST_THRESHOLD)
}

fn critical_component(record: &BridgeRecord, status: &str) -> Option<&'static str> {
    if status == CLOSED {
        return None;
    }
    COMPONENT_RATINGS
        .iter()
        .copied()
        .find(|item| rating(field(record, item)).is_some_and(|r| r <= CRITICAL_RATING))
}

fn failed_deck(record: &BridgeRecord, status: &str) -> Option<&'static str> {
    if status == CLOSED {
        return None;
    }
    (rating(field(record, "BC01")) == Some(FAILED_RATING)).then_some("BC01")
}
