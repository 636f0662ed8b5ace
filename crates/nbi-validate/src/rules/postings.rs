//! Load posting evaluation and posting status rules.

use nbi_model::EntityKind;

use super::check::{Check, Rule, Scope};
use super::support::{not_future, number};
use crate::context::RuleContext;
use crate::input::RuleInput;

/// A legal-load rating factor below this requires a posting.
const POSTING_THRESHOLD: f64 = 1.0;

pub fn evaluation_rules() -> Vec<Rule> {
    let kind = EntityKind::PostingEvaluation;
    vec![
        Rule::new("BEP01_REQUIRED", kind, "BEP01", Check::Required)
            .identity()
            .describe("Legal Load Configuration is required"),
        Rule::new("BEP02_REQUIRED", kind, "BEP02", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Legal Load Rating Factor is required"),
        Rule::new("BEP03_REQUIRED", kind, "BEP03", Check::Custom(posted_below_threshold))
            .scope(Scope::Ordinary)
            .describe("Posting Type is required when the rating factor is below 1.00"),
        Rule::new("BEP04_REQUIRED", kind, "BEP04", Check::Custom(posting_has_value))
            .scope(Scope::Ordinary)
            .describe("Posting Value is required with a Posting Type"),
    ]
}

pub fn status_rules() -> Vec<Rule> {
    let kind = EntityKind::PostingStatus;
    vec![
        Rule::new("BPS02_REQUIRED", kind, "BPS02", Check::Required)
            .identity()
            .describe("Posting Status Change Date is required"),
        Rule::new("BPS01_REQUIRED", kind, "BPS01", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Load Posting Status is required"),
        Rule::new("BPS02_NOT_FUTURE", kind, "BPS02", Check::Custom(changed_in_past))
            .scope(Scope::Ordinary)
            .describe("Posting Status Change Date must not be in the future"),
    ]
}

fn posted_below_threshold(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    number(input.value("BEP02")).is_none_or(|factor| factor >= POSTING_THRESHOLD)
        || input.value("BEP03").is_some()
}

fn posting_has_value(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    input.value("BEP03").is_none() || input.value("BEP04").is_some()
}

fn changed_in_past(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    not_future(input.value("BPS02"), ctx.as_of)
}
