//! Border-bridge classification and the rules only border bundles carry.
//!
//! A border bridge is reported in full by its designated lead state. Every
//! other state submits only identification, location and border items, so
//! its bundles are narrower: the primary record keeps the rules on
//! [`BORDER_PERMITTED`] items and every child dataset keeps its identity
//! rules plus a "no other data" check.

use nbi_model::{BridgeRecord, DynEntity, EntityKind, trimmed};

use crate::context::RuleContext;
use crate::input::RuleInput;
use crate::rules::{Check, Rule, Scope};

/// Primary-record items a non-lead state may report for a border bridge.
pub const BORDER_PERMITTED: &[&str] = &[
    "BID01", "BID02", "BID03", "BL01", "BL02", "BL03", "BL04", "BL05", "BL06", "BL07", "BL08",
    "BL09", "BL10", "BL11", "BL12",
];

/// Border indicator meaning the bridge is not on a border.
pub const NO_BORDER: &str = "N";

/// Neighbouring-country codes accepted wherever a border state code is.
pub const COUNTRY_CODES: &[&str] = &["CA", "MX"];

fn is_country(code: &str) -> bool {
    COUNTRY_CODES.iter().any(|c| c.eq_ignore_ascii_case(code))
}

/// The record is on a border and some other state or a neighbouring
/// country leads it.
///
/// State codes compare numerically so that "6" and "06" are the same state.
/// A lead state that is neither numeric nor a country code cannot be
/// compared and leaves the record ordinary.
pub fn is_border_bridge(record: &BridgeRecord) -> bool {
    let Some(indicator) = trimmed(record.get("BL08")) else {
        return false;
    };
    if indicator.eq_ignore_ascii_case(NO_BORDER) {
        return false;
    }
    let Some(lead) = trimmed(record.get("BL10")) else {
        return false;
    };
    if is_country(lead) {
        return true;
    }
    let own = trimmed(record.get("BL01")).and_then(|s| s.parse::<u32>().ok());
    match (lead.parse::<u32>().ok(), own) {
        (Some(lead), Some(own)) => lead != own,
        _ => false,
    }
}

/// Border items, their presence conditionals and the "no other data"
/// checks for every dataset.
pub fn border_rules() -> Vec<Rule> {
    let kind = EntityKind::Bridge;
    let mut rules = vec![
        Rule::new("BL08_BORDER_CODE", kind, "BL08", Check::Custom(border_indicator_known))
            .describe("Border Bridge State or Country Code must be N, a state or a country code"),
        Rule::new("BL09_BORDER_CODE", kind, "BL09", Check::Custom(responsible_state_known))
            .describe("Border Bridge Inspection Responsibility must be a state or a country code"),
        Rule::new("BL10_BORDER_CODE", kind, "BL10", Check::Custom(lead_state_known))
            .describe("Border Bridge Designated Lead State must be a state or a country code"),
        Rule::new("BL07_REQUIRED_BORDER", kind, "BL07", Check::Custom(border_number_present))
            .describe("Border Bridge Number is required on a border bridge"),
        Rule::new("BL10_REQUIRED_BORDER", kind, "BL10", Check::Custom(lead_state_present))
            .describe("Border Bridge Designated Lead State is required on a border bridge"),
        Rule::new("BORDER_NO_OTHER_DATA", kind, "BL10", Check::Custom(only_permitted_items))
            .scope(Scope::Border)
            .describe("Only the lead state reports data beyond identification and location"),
    ];
    for &child in EntityKind::children() {
        let item = child.key_items()[0];
        rules.push(
            Rule::new(no_child_data_rule(child), child, item, Check::Custom(only_key_items))
                .scope(Scope::Border)
                .describe(format!(
                    "Only the lead state reports {} beyond their keys",
                    child.dataset_name()
                )),
        );
    }
    rules
}

/// Name of the border "no other data" rule for a child dataset.
pub fn no_child_data_rule(kind: EntityKind) -> String {
    format!(
        "BORDER_NO_{}_DATA",
        kind.slug().replace('-', "_").to_ascii_uppercase()
    )
}

fn border_code_known(ctx: &RuleContext<'_>, value: Option<&str>) -> bool {
    value.is_none_or(|code| is_country(code) || ctx.cache.is_valid_state(Some(code)))
}

fn on_border(input: &RuleInput<'_>) -> bool {
    input
        .bridge_value("BL08")
        .is_some_and(|indicator| !indicator.eq_ignore_ascii_case(NO_BORDER))
}

fn border_indicator_known(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    !on_border(input) || border_code_known(ctx, input.value("BL08"))
}

fn responsible_state_known(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    border_code_known(ctx, input.value("BL09"))
}

fn lead_state_known(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    border_code_known(ctx, input.value("BL10"))
}

fn border_number_present(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !on_border(input) || input.value("BL07").is_some()
}

fn lead_state_present(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !on_border(input) || input.value("BL10").is_some()
}

fn only_permitted_items(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    input
        .populated_items()
        .all(|item| BORDER_PERMITTED.contains(&item))
}

fn only_key_items(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let keys = input.kind().key_items();
    input.populated_items().all(|item| keys.contains(&item))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, indicator: &str, lead: &str) -> BridgeRecord {
        let value = |s: &str| (!s.is_empty()).then(|| s.to_string());
        BridgeRecord {
            state_code: value(state),
            border_state_or_country: value(indicator),
            border_lead_state: value(lead),
            ..BridgeRecord::default()
        }
    }

    #[test]
    fn lead_state_compares_numerically() {
        assert!(is_border_bridge(&record("06", "32", "32")));
        assert!(!is_border_bridge(&record("06", "32", "6")));
        assert!(!is_border_bridge(&record("06", "N", "32")));
        assert!(!is_border_bridge(&record("06", "", "32")));
    }

    #[test]
    fn country_lead_is_always_border() {
        assert!(is_border_bridge(&record("36", "CA", "ca")));
        assert!(is_border_bridge(&record("", "MX", "MX")));
    }

    #[test]
    fn uncomparable_lead_is_ordinary() {
        assert!(!is_border_bridge(&record("06", "32", "NV")));
        assert!(!is_border_bridge(&record("06", "32", "")));
        assert!(!is_border_bridge(&record("", "32", "32")));
    }

    #[test]
    fn child_rule_names_are_distinct() {
        let names: std::collections::BTreeSet<_> = EntityKind::children()
            .iter()
            .map(|&kind| no_child_data_rule(kind))
            .collect();
        assert_eq!(names.len(), EntityKind::children().len());
        assert!(names.contains("BORDER_NO_SPAN_SETS_DATA"));
    }
}
