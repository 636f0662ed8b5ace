//! Presence, cross-field and cross-dataset rules on the primary record.

use std::sync::LazyLock;

use regex::Regex;

use nbi_model::{EntityKind, Severity};

use super::check::{Check, Rule, Scope};
use super::support::{
    NOT_APPLICABLE, field, is_code, lowest_component_rating, not_future, not_greater, number,
    rating, year_not_future,
};
use crate::context::RuleContext;
use crate::input::RuleInput;

static BRIDGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ._\-]*$").expect("Invalid bridge number regex")
});

static PLACE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("Invalid place code regex"));

/// Deck material code meaning the span set has no deck.
pub const NO_DECK: &str = "N01";

/// Inspection type codes required by the inspection-required indicators.
pub const UNDERWATER_INSPECTION: &str = "3";
pub const NSTM_INSPECTION: &str = "4";

const KIND: EntityKind = EntityKind::Bridge;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new("BID01_REQUIRED", KIND, "BID01", Check::Required)
            .identity()
            .describe("Bridge Number is required"),
        Rule::new("BL01_REQUIRED", KIND, "BL01", Check::Required)
            .identity()
            .describe("State Code is required"),
        Rule::new("BL01_STATE", KIND, "BL01", Check::State)
            .identity()
            .describe("State Code must be a valid state code"),
        Rule::new("BID01_PATTERN", KIND, "BID01", Check::Pattern(&BRIDGE_NUMBER))
            .describe("Bridge Number may contain only letters, digits, spaces, '.', '_' and '-'"),
        Rule::new("BL02_REQUIRED", KIND, "BL02", Check::Required)
            .describe("County Code is required"),
        Rule::new("BL02_COUNTY", KIND, "BL02", Check::County)
            .describe("County Code must be a valid county of the submitted state"),
        Rule::new("BL03_PATTERN", KIND, "BL03", Check::Pattern(&PLACE_CODE))
            .describe("Place Code must be five digits"),
        Rule::new("BL05_REQUIRED", KIND, "BL05", Check::Required)
            .describe("Latitude is required"),
        Rule::new("BL05_RANGE", KIND, "BL05", Check::Range { min: 17.0, max: 72.0 })
            .describe("Latitude must fall between 17 and 72 degrees north"),
        Rule::new("BL06_REQUIRED", KIND, "BL06", Check::Required)
            .describe("Longitude is required"),
        Rule::new("BL06_RANGE", KIND, "BL06", Check::Range { min: -180.0, max: -64.0 })
            .describe("Longitude must fall between 64 and 180 degrees west"),
        Rule::new("BCL01_REQUIRED", KIND, "BCL01", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Owner is required"),
        Rule::new("BCL02_REQUIRED", KIND, "BCL02", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Maintenance Responsibility is required"),
        Rule::new("BG01_REQUIRED", KIND, "BG01", Check::Required)
            .scope(Scope::Ordinary)
            .describe("NBIS Bridge Length is required"),
        Rule::new("BG01_MINIMUM", KIND, "BG01", Check::Custom(nbis_length_minimum))
            .severity(Severity::Flag)
            .scope(Scope::Ordinary)
            .describe("NBIS Bridge Length under 20 feet does not meet the inventory definition"),
        Rule::new("BG02_NOT_LESS_THAN_BG01", KIND, "BG02", Check::Custom(total_length_covers_nbis))
            .scope(Scope::Ordinary)
            .describe("Total Bridge Length must not be less than NBIS Bridge Length"),
        Rule::new("BG03_NOT_LESS_THAN_BG04", KIND, "BG03", Check::Custom(max_span_covers_min))
            .scope(Scope::Ordinary)
            .describe("Maximum Span Length must not be less than Minimum Span Length"),
        Rule::new("BG05_NOT_LESS_THAN_BG06", KIND, "BG05", Check::Custom(width_covers_roadway))
            .scope(Scope::Ordinary)
            .describe("Bridge Width Out-to-Out must not be less than Bridge Width Curb-to-Curb"),
        Rule::new("BG11_RANGE", KIND, "BG11", Check::Range { min: 0.0, max: 90.0 })
            .scope(Scope::Ordinary)
            .describe("Skew must be between 0 and 90 degrees"),
        Rule::new("BLR03_NOT_FUTURE", KIND, "BLR03", Check::Custom(rating_date_not_future))
            .scope(Scope::Ordinary)
            .describe("Load Rating Date must not be in the future"),
        Rule::new(
            "BLR05_NOT_GREATER_THAN_BLR06",
            KIND,
            "BLR05",
            Check::Custom(inventory_within_operating),
        )
        .scope(Scope::Ordinary)
        .describe("Inventory Load Rating Factor must not exceed Operating Load Rating Factor"),
        Rule::new("BLR06_REQUIRED", KIND, "BLR06", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Operating Load Rating Factor is required"),
        Rule::new("BLR07_REQUIRED", KIND, "BLR07", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Controlling Legal Load Rating Factor is required"),
        Rule::new("BIR01_NSTM_INSPECTION", KIND, "BIR01", Check::Custom(nstm_inspection_reported))
            .scope(Scope::Ordinary)
            .describe("NSTM Inspection Required is Y but no NSTM inspection is reported"),
        Rule::new(
            "BIR03_UNDERWATER_INSPECTION",
            KIND,
            "BIR03",
            Check::Custom(underwater_inspection_reported),
        )
        .scope(Scope::Ordinary)
        .describe("Underwater Inspection Required is Y but no underwater inspection is reported"),
        Rule::new("BC01_DECK_PRESENT", KIND, "BC01", Check::Custom(rated_deck_has_deck))
            .scope(Scope::Ordinary)
            .describe("A rated deck requires a span set with a deck material"),
        Rule::new("BC01_NO_DECK", KIND, "BC01", Check::Custom(deckless_spans_not_rated))
            .scope(Scope::Ordinary)
            .describe("Deck Condition Rating must be N when no span set carries a deck"),
        Rule::new("BC04_CULVERT_EXCLUSIVE", KIND, "BC04", Check::Custom(culvert_rating_exclusive))
            .scope(Scope::Ordinary)
            .describe(
                "A rated culvert requires deck, superstructure and substructure ratings of N",
            ),
        Rule::new("BC09_WATERWAY", KIND, "BC09", Check::Custom(channel_rating_needs_waterway))
            .severity(Severity::Flag)
            .scope(Scope::Ordinary)
            .describe("Channel Condition Rating is reported but no waterway feature is"),
        Rule::new("BC11_REQUIRED_OVER_WATER", KIND, "BC11", Check::Custom(scour_rating_over_water))
            .scope(Scope::Ordinary)
            .describe("Scour Condition Rating is required for a bridge over a waterway"),
        Rule::new(
            "BC12_CLASSIFICATION",
            KIND,
            "BC12",
            Check::Custom(classification_matches_ratings),
        )
        .scope(Scope::Ordinary)
        .describe("Bridge Condition Classification must agree with the lowest component rating"),
        Rule::new("BC13_LOWEST", KIND, "BC13", Check::Custom(lowest_rating_matches))
            .scope(Scope::Ordinary)
            .describe("Lowest Condition Rating Code must equal the lowest component rating"),
        Rule::new("BAP03_OVER_WATER", KIND, "BAP03", Check::Custom(scour_vulnerability_over_water))
            .scope(Scope::Ordinary)
            .describe("Scour Vulnerability must not be N for a bridge over a waterway"),
        Rule::new("BW01_REQUIRED", KIND, "BW01", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Year Built is required"),
        Rule::new("BW01_NOT_FUTURE", KIND, "BW01", Check::Custom(year_built_not_future))
            .scope(Scope::Ordinary)
            .describe("Year Built must not be in the future"),
    ]
}

fn nbis_length_minimum(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    number(input.value("BG01")).is_none_or(|length| length >= 20.0)
}

fn total_length_covers_nbis(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    not_greater(number(input.value("BG01")), number(input.value("BG02")))
}

fn max_span_covers_min(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    not_greater(number(input.value("BG04")), number(input.value("BG03")))
}

fn width_covers_roadway(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    not_greater(number(input.value("BG06")), number(input.value("BG05")))
}

fn rating_date_not_future(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    not_future(input.value("BLR03"), ctx.as_of)
}

fn inventory_within_operating(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    not_greater(number(input.value("BLR05")), number(input.value("BLR06")))
}

fn has_inspection_type(input: &RuleInput<'_>, code: &str) -> bool {
    input
        .bridge
        .inspections
        .iter()
        .any(|inspection| is_code(field(inspection, "BIE01"), code))
}

fn nstm_inspection_reported(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !is_code(input.value("BIR01"), "Y") || has_inspection_type(input, NSTM_INSPECTION)
}

fn underwater_inspection_reported(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !is_code(input.value("BIR03"), "Y") || has_inspection_type(input, UNDERWATER_INSPECTION)
}

/// Span set carries a deck: deck material populated and not the no-deck code.
pub(crate) fn carries_deck(span_set: &nbi_model::SpanSet) -> bool {
    field(span_set, "BSP09").is_some_and(|material| !material.eq_ignore_ascii_case(NO_DECK))
}

fn rated_deck_has_deck(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let span_sets = &input.bridge.span_sets;
    if span_sets.is_empty() || rating(input.value("BC01")).is_none() {
        return true;
    }
    span_sets.iter().any(carries_deck)
}

fn deckless_spans_not_rated(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let span_sets = &input.bridge.span_sets;
    let no_deck_anywhere = !span_sets.is_empty()
        && span_sets
            .iter()
            .all(|set| is_code(field(set, "BSP09"), NO_DECK));
    !no_deck_anywhere || is_code(input.value("BC01"), NOT_APPLICABLE)
}

fn culvert_rating_exclusive(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    if rating(input.value("BC04")).is_none() {
        return true;
    }
    ["BC01", "BC02", "BC03"]
        .iter()
        .all(|item| rating(input.value(item)).is_none())
}

fn has_waterway(input: &RuleInput<'_>) -> Option<bool> {
    let features = &input.bridge.features;
    if features.is_empty() {
        return None;
    }
    Some(features.iter().any(nbi_model::Feature::is_waterway))
}

fn channel_rating_needs_waterway(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    if rating(input.value("BC09")).is_none() {
        return true;
    }
    has_waterway(input).unwrap_or(true)
}

fn scour_rating_over_water(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !has_waterway(input).unwrap_or(false) || input.value("BC11").is_some()
}

fn scour_vulnerability_over_water(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !has_waterway(input).unwrap_or(false) || !is_code(input.value("BAP03"), NOT_APPLICABLE)
}

/// Good at 7 and above, Fair at 5 and 6, Poor at 4 and below.
pub fn classification_for(lowest: u8) -> &'static str {
    match lowest {
        7.. => "G",
        5 | 6 => "F",
        _ => "P",
    }
}

fn classification_matches_ratings(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let (Some(class), Some(lowest)) = (input.value("BC12"), lowest_component_rating(input.bridge))
    else {
        return true;
    };
    class.eq_ignore_ascii_case(classification_for(lowest))
}

fn lowest_rating_matches(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let Some(lowest) = lowest_component_rating(input.bridge) else {
        return true;
    };
    match input.value("BC13") {
        Some(reported) => rating(Some(reported)) == Some(lowest),
        None => true,
    }
}

fn year_built_not_future(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    year_not_future(input.value("BW01"), ctx.as_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_thresholds() {
        assert_eq!(classification_for(9), "G");
        assert_eq!(classification_for(7), "G");
        assert_eq!(classification_for(6), "F");
        assert_eq!(classification_for(5), "F");
        assert_eq!(classification_for(4), "P");
        assert_eq!(classification_for(0), "P");
    }
}
