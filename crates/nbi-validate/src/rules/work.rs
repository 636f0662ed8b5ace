//! Work history rules.

use nbi_model::EntityKind;

use super::check::{Check, Rule, Scope};
use super::support::{integer, year_not_future};
use crate::context::RuleContext;
use crate::input::RuleInput;

pub fn rules() -> Vec<Rule> {
    let kind = EntityKind::Work;
    vec![
        Rule::new("BW02_REQUIRED", kind, "BW02", Check::Required)
            .identity()
            .describe("Year Work Performed is required"),
        Rule::new("BW03_REQUIRED", kind, "BW03", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Work Performed is required"),
        Rule::new("BW02_NOT_FUTURE", kind, "BW02", Check::Custom(performed_in_past))
            .scope(Scope::Ordinary)
            .describe("Year Work Performed must not be in the future"),
        Rule::new("BW02_NOT_BEFORE_BW01", kind, "BW02", Check::Custom(performed_after_built))
            .scope(Scope::Ordinary)
            .describe("Year Work Performed must not precede Year Built"),
    ]
}

fn performed_in_past(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    year_not_future(input.value("BW02"), ctx.as_of)
}

fn performed_after_built(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    match (integer(input.value("BW02")), integer(input.bridge_value("BW01"))) {
        (Some(performed), Some(built)) => performed >= built,
        _ => true,
    }
}
