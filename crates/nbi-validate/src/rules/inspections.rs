//! Inspection rules.

use nbi_model::EntityKind;

use super::check::{Check, Rule, Scope};
use super::support::{date, not_future};
use crate::context::RuleContext;
use crate::input::RuleInput;

pub fn rules() -> Vec<Rule> {
    let kind = EntityKind::Inspection;
    vec![
        Rule::new("BIE01_REQUIRED", kind, "BIE01", Check::Required)
            .identity()
            .describe("Inspection Type is required"),
        Rule::new("BIE02_REQUIRED", kind, "BIE02", Check::Required)
            .identity()
            .describe("Inspection Begin Date is required"),
        Rule::new("BIE02_NOT_FUTURE", kind, "BIE02", Check::Custom(begun_in_past))
            .scope(Scope::Ordinary)
            .describe("Inspection Begin Date must not be in the future"),
        Rule::new("BIE03_NOT_FUTURE", kind, "BIE03", Check::Custom(completed_in_past))
            .scope(Scope::Ordinary)
            .describe("Inspection Completion Date must not be in the future"),
        Rule::new("BIE03_NOT_BEFORE_BIE02", kind, "BIE03", Check::Custom(completed_after_begin))
            .scope(Scope::Ordinary)
            .describe("Inspection Completion Date must not precede Inspection Begin Date"),
        Rule::new("BIE04_REQUIRED", kind, "BIE04", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Nationally Certified Bridge Inspector is required"),
        Rule::new("BIE05_REQUIRED", kind, "BIE05", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Inspection Interval is required"),
        Rule::new("BIE05_RANGE", kind, "BIE05", Check::Range { min: 1.0, max: 48.0 })
            .scope(Scope::Ordinary)
            .describe("Inspection Interval must be between 1 and 48 months"),
        Rule::new("BIE06_AFTER_BIE02", kind, "BIE06", Check::Custom(due_after_begin))
            .scope(Scope::Ordinary)
            .describe("Inspection Due Date must follow Inspection Begin Date"),
    ]
}

fn begun_in_past(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    not_future(input.value("BIE02"), ctx.as_of)
}

fn completed_in_past(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    not_future(input.value("BIE03"), ctx.as_of)
}

fn completed_after_begin(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    match (date(input.value("BIE02")), date(input.value("BIE03"))) {
        (Some(begin), Some(completed)) => completed >= begin,
        _ => true,
    }
}

fn due_after_begin(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    match (date(input.value("BIE02")), date(input.value("BIE06"))) {
        (Some(begin), Some(due)) => due > begin,
        _ => true,
    }
}
