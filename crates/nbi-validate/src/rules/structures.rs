//! Span set and substructure set rules.

use std::sync::LazyLock;

use regex::Regex;

use nbi_model::{EntityKind, Severity};

use super::bridge::NO_DECK;
use super::check::{Check, Rule, Scope};
use super::support::is_code;
use crate::context::RuleContext;
use crate::input::RuleInput;

/// Main (`M`) or approach (`A`) span configuration.
static SPAN_CONFIGURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[MA]\d{2}$").expect("Invalid span configuration regex")
});

/// Abutment (`A`) or pier (`P`) substructure configuration.
static SUBSTRUCTURE_CONFIGURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[AP]\d{2}$").expect("Invalid substructure configuration regex")
});

/// Deck interaction codes meaning the deck is structural.
const COMPOSITE_DECK: &[&str] = &["1", "2"];

pub fn span_rules() -> Vec<Rule> {
    let kind = EntityKind::SpanSet;
    vec![
        Rule::new("BSP01_REQUIRED", kind, "BSP01", Check::Required)
            .identity()
            .describe("Span Configuration Designation is required"),
        Rule::new("BSP01_PATTERN", kind, "BSP01", Check::Pattern(&SPAN_CONFIGURATION))
            .scope(Scope::Ordinary)
            .describe("Span Configuration Designation must be M or A followed by two digits"),
        Rule::new("BSP02_REQUIRED", kind, "BSP02", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Number of Spans is required"),
        Rule::new("BSP04_REQUIRED", kind, "BSP04", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Span Material is required"),
        Rule::new("BSP06_REQUIRED", kind, "BSP06", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Span Type is required"),
        Rule::new("BSP09_COMPOSITE_DECK", kind, "BSP09", Check::Custom(composite_has_deck))
            .scope(Scope::Ordinary)
            .describe("A deck that interacts with the superstructure requires a deck material"),
        Rule::new("BSP10_NO_DECK", kind, "BSP10", Check::Custom(no_wearing_surface_without_deck))
            .severity(Severity::Flag)
            .scope(Scope::Ordinary)
            .describe("Wearing Surface is reported on a span set without a deck"),
    ]
}

pub fn substructure_rules() -> Vec<Rule> {
    let kind = EntityKind::SubstructureSet;
    vec![
        Rule::new("BSB01_REQUIRED", kind, "BSB01", Check::Required)
            .identity()
            .describe("Substructure Configuration Designation is required"),
        Rule::new("BSB01_PATTERN", kind, "BSB01", Check::Pattern(&SUBSTRUCTURE_CONFIGURATION))
            .scope(Scope::Ordinary)
            .describe(
                "Substructure Configuration Designation must be A or P followed by two digits",
            ),
        Rule::new("BSB02_REQUIRED", kind, "BSB02", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Number of Substructure Units is required"),
        Rule::new("BSB03_REQUIRED", kind, "BSB03", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Substructure Material is required"),
        Rule::new("BSB04_REQUIRED", kind, "BSB04", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Substructure Type is required"),
    ]
}

fn composite_has_deck(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    let composite = input
        .value("BSP08")
        .is_some_and(|code| COMPOSITE_DECK.contains(&code));
    !composite || input.value("BSP09").is_some_and(|material| !is_code(Some(material), NO_DECK))
}

fn no_wearing_surface_without_deck(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !is_code(input.value("BSP09"), NO_DECK) || input.value("BSP10").is_none()
}
