//! Element rules: identity, condition-state totals and structure agreement.

use nbi_model::{EntityKind, Severity};

use super::bridge::carries_deck;
use super::check::{Check, Rule, Scope};
use super::support::{field, integer, is_code};
use crate::context::RuleContext;
use crate::input::RuleInput;

/// Culvert element numbers.
const CULVERT_ELEMENTS: std::ops::RangeInclusive<i64> = 240..=245;

/// Deck and slab element numbers.
const DECK_ELEMENTS: &[i64] = &[12, 13, 15, 16, 28, 29, 30, 31, 38, 54, 60, 65];

/// Span type codes of culverts start with this letter.
const CULVERT_SPAN_PREFIX: char = 'C';

const CONDITION_STATES: &[&str] = &["BE04", "BE05", "BE06", "BE07"];

pub fn rules() -> Vec<Rule> {
    let kind = EntityKind::Element;
    vec![
        Rule::new("BE01_REQUIRED", kind, "BE01", Check::Required)
            .identity()
            .describe("Element Number is required"),
        Rule::new("BE02_PARENT_EXISTS", kind, "BE02", Check::Custom(parent_reported))
            .scope(Scope::Ordinary)
            .describe("Element Parent Number must name an element reported on the bridge"),
        Rule::new("BE03_REQUIRED", kind, "BE03", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Element Total Quantity is required"),
        Rule::new("BE03_STATE_TOTAL", kind, "BE03", Check::Custom(states_sum_to_total))
            .scope(Scope::Ordinary)
            .describe("Condition state quantities must sum to Element Total Quantity"),
        Rule::new("BE01_CULVERT_SPAN", kind, "BE01", Check::Custom(culvert_has_culvert_span))
            .scope(Scope::Ordinary)
            .describe("A culvert element requires a culvert span set"),
        Rule::new("BE01_DECK_MATERIAL", kind, "BE01", Check::Custom(deck_has_deck_span))
            .severity(Severity::Flag)
            .scope(Scope::Ordinary)
            .describe("A deck element requires a span set that carries a deck"),
    ]
}

fn element_number(input: &RuleInput<'_>) -> Option<i64> {
    integer(input.value("BE01"))
}

fn parent_reported(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let Some(parent) = input.value("BE02") else {
        return true;
    };
    if parent == "0" {
        return true;
    }
    input
        .bridge
        .elements
        .iter()
        .any(|element| is_code(field(element, "BE01"), parent))
}

/// Unreadable quantities, or a sum too large to hold, cannot be validated.
fn states_sum_to_total(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let Some(total) = integer(input.value("BE03")) else {
        return true;
    };
    let mut sum = 0_i64;
    for item in CONDITION_STATES {
        if let Some(value) = input.value(item) {
            let Some(quantity) = integer(Some(value)) else {
                return true;
            };
            let Some(next) = sum.checked_add(quantity) else {
                return true;
            };
            sum = next;
        }
    }
    sum == total
}

fn culvert_has_culvert_span(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let span_sets = &input.bridge.span_sets;
    let is_culvert = element_number(input).is_some_and(|n| CULVERT_ELEMENTS.contains(&n));
    if span_sets.is_empty() || !is_culvert {
        return true;
    }
    span_sets.iter().any(|set| {
        field(set, "BSP06")
            .and_then(|code| code.chars().next())
            .is_some_and(|first| first.eq_ignore_ascii_case(&CULVERT_SPAN_PREFIX))
    })
}

fn deck_has_deck_span(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let span_sets = &input.bridge.span_sets;
    let is_deck = element_number(input).is_some_and(|n| DECK_ELEMENTS.contains(&n));
    if span_sets.is_empty() || !is_deck {
        return true;
    }
    span_sets.iter().any(carries_deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbi_model::{BridgeRecord, Element};
    use nbi_standards::{CodeListCache, InMemoryReferenceSource};

    fn element(number: &str, total: &str, states: [&str; 4]) -> Element {
        let [one, two, three, four] = states.map(|s| (!s.is_empty()).then(|| s.to_string()));
        Element {
            element_number: Some(number.into()),
            total_quantity: Some(total.into()),
            cs1_quantity: one,
            cs2_quantity: two,
            cs3_quantity: three,
            cs4_quantity: four,
            ..Element::default()
        }
    }

    #[test]
    fn condition_states_must_add_up() {
        let cache = CodeListCache::new(InMemoryReferenceSource::new());
        let ctx = RuleContext::new(&cache, chrono::NaiveDate::MIN);
        let bridge = BridgeRecord::default();

        let balanced = element("12", "100", ["60", "40", "", ""]);
        assert!(states_sum_to_total(&RuleInput::child(&balanced, &bridge), &ctx));

        let short = element("12", "100", ["60", "30", "", ""]);
        assert!(!states_sum_to_total(&RuleInput::child(&short, &bridge), &ctx));

        let unreadable = element("12", "100", ["sixty", "", "", ""]);
        assert!(states_sum_to_total(&RuleInput::child(&unreadable, &bridge), &ctx));
    }

    #[test]
    fn oversized_state_quantities_cannot_be_validated() {
        let cache = CodeListCache::new(InMemoryReferenceSource::new());
        let ctx = RuleContext::new(&cache, chrono::NaiveDate::MIN);
        let bridge = BridgeRecord::default();
        let max = i64::MAX.to_string();

        let overflowing = element("12", "1", [max.as_str(), "1", "", ""]);
        assert!(states_sum_to_total(&RuleInput::child(&overflowing, &bridge), &ctx));

        let huge = element("12", "1", [max.as_str(), max.as_str(), max.as_str(), max.as_str()]);
        assert!(states_sum_to_total(&RuleInput::child(&huge, &bridge), &ctx));
    }
}
