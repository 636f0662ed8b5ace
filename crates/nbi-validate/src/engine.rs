//! Rule engine: evaluates workflows against records and their children.
//!
//! Every rule in a workflow is evaluated independently; a rule fires when
//! its check returns false and becomes a [`FailedRule`] carrying the
//! originating entity's identity. Evaluation never mutates the record, so
//! evaluating the same record twice yields the same failures.

use nbi_model::numeric::parse_f64;
use nbi_model::{
    BridgeRecord, DecimalText, DynEntity, EntityKind, FailedRule, FieldKind, parse_date,
};
use nbi_standards::CodeMatch;
use tracing::debug;

use crate::border::is_border_bridge;
use crate::context::{CodeTally, RuleContext};
use crate::error::{Result, ValidateError};
use crate::input::RuleInput;
use crate::rules::{Check, Rule, RuleRegistry};
use crate::workflow::{BundledRule, Workflow, WorkflowSet};

/// Failures of one primary record and all of its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeEvaluation {
    pub border: bool,
    pub failures: Vec<FailedRule>,
}

/// Rule engine holding the workflows a batch is evaluated with.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    workflows: WorkflowSet,
}

impl RuleEngine {
    pub fn new(workflows: WorkflowSet) -> Self {
        Self { workflows }
    }

    /// Engine with the default workflows derived from `registry`.
    pub fn with_defaults(registry: &RuleRegistry) -> Self {
        Self::new(WorkflowSet::defaults(registry))
    }

    pub fn workflows(&self) -> &WorkflowSet {
        &self.workflows
    }

    fn workflow(&self, kind: EntityKind, border: bool) -> Result<&Workflow> {
        self.workflows
            .select(kind, border)
            .ok_or_else(|| ValidateError::MissingWorkflow {
                name: kind.workflow_name(border),
            })
    }

    /// Evaluate one input against a workflow, in workflow order.
    pub fn evaluate(
        &self,
        workflow: &Workflow,
        input: &RuleInput<'_>,
        ctx: &RuleContext<'_>,
        tally: &mut CodeTally,
    ) -> Vec<FailedRule> {
        workflow
            .rules
            .iter()
            .filter(|bundled| !passes(&bundled.rule, input, ctx, tally))
            .map(|bundled| failure(bundled, input))
            .collect()
    }

    /// Classify the record, then evaluate it and every child (routes
    /// included) with the matching workflows.
    pub fn evaluate_bridge(
        &self,
        record: &BridgeRecord,
        ctx: &RuleContext<'_>,
        tally: &mut CodeTally,
    ) -> Result<BridgeEvaluation> {
        let border = is_border_bridge(record);
        let mut failures = self.evaluate(
            self.workflow(EntityKind::Bridge, border)?,
            &RuleInput::bridge(record),
            ctx,
            tally,
        );

        let features = self.workflow(EntityKind::Feature, border)?;
        let routes = self.workflow(EntityKind::Route, border)?;
        for feature in &record.features {
            failures.extend(self.evaluate(
                features,
                &RuleInput::feature(feature, record),
                ctx,
                tally,
            ));
            for route in &feature.routes {
                let input = RuleInput::route(route, feature, record);
                failures.extend(self.evaluate(routes, &input, ctx, tally));
            }
        }

        let workflow = |kind| self.workflow(kind, border);
        failures.extend(self.children(
            workflow(EntityKind::Element)?,
            &record.elements,
            record,
            ctx,
            tally,
        ));
        failures.extend(self.children(
            workflow(EntityKind::Inspection)?,
            &record.inspections,
            record,
            ctx,
            tally,
        ));
        failures.extend(self.children(
            workflow(EntityKind::PostingEvaluation)?,
            &record.posting_evaluations,
            record,
            ctx,
            tally,
        ));
        failures.extend(self.children(
            workflow(EntityKind::PostingStatus)?,
            &record.posting_statuses,
            record,
            ctx,
            tally,
        ));
        failures.extend(self.children(
            workflow(EntityKind::SpanSet)?,
            &record.span_sets,
            record,
            ctx,
            tally,
        ));
        failures.extend(self.children(
            workflow(EntityKind::SubstructureSet)?,
            &record.substructure_sets,
            record,
            ctx,
            tally,
        ));
        failures.extend(self.children(
            workflow(EntityKind::Work)?,
            &record.work,
            record,
            ctx,
            tally,
        ));

        debug!(
            record = %record.id,
            border,
            failures = failures.len(),
            "record evaluated"
        );
        Ok(BridgeEvaluation { border, failures })
    }

    fn children<T: DynEntity>(
        &self,
        workflow: &Workflow,
        children: &[T],
        record: &BridgeRecord,
        ctx: &RuleContext<'_>,
        tally: &mut CodeTally,
    ) -> Vec<FailedRule> {
        let mut failures = Vec::new();
        for child in children {
            let input = RuleInput::child(child, record);
            failures.extend(self.evaluate(workflow, &input, ctx, tally));
        }
        failures
    }
}

fn failure(bundled: &BundledRule, input: &RuleInput<'_>) -> FailedRule {
    let rule = &bundled.rule;
    FailedRule {
        rule: rule.name.clone(),
        severity: bundled.severity,
        item: rule.item.to_string(),
        field_name: rule.field_name.to_string(),
        dataset: rule.kind.dataset_name().to_string(),
        fatal: bundled.fatal,
        description: rule.description.clone(),
        origin: input.origin(rule.item),
    }
}

/// Whether `input` satisfies `rule`. Only `Required` and `Custom` checks
/// look at blank values; every other check passes them.
pub fn passes(
    rule: &Rule,
    input: &RuleInput<'_>,
    ctx: &RuleContext<'_>,
    tally: &mut CodeTally,
) -> bool {
    let value = input.value(rule.item);
    match rule.check {
        Check::Required => value.is_some(),
        Check::Custom(predicate) => predicate(input, ctx),
        _ => {
            let Some(value) = value else {
                return true;
            };
            passes_value(rule, value, input, ctx, tally)
        }
    }
}

fn passes_value(
    rule: &Rule,
    value: &str,
    input: &RuleInput<'_>,
    ctx: &RuleContext<'_>,
    tally: &mut CodeTally,
) -> bool {
    let kind = rule.kind.spec(rule.item).map(|spec| spec.kind);
    match rule.check {
        Check::Required | Check::Custom(_) => true,
        Check::Pattern(pattern) => pattern.is_match(value),
        Check::Lookup(list) => match ctx.cache.classify(list, Some(value)) {
            CodeMatch::Listed => true,
            CodeMatch::Fallback => {
                for code in ctx.cache.fallback_codes(list, Some(value)) {
                    tally.record(rule.item, &code);
                }
                true
            }
            CodeMatch::Invalid => false,
        },
        Check::State => ctx.cache.is_valid_state(Some(value)),
        Check::County => match input.bridge_value("BL01") {
            Some(state) => ctx.cache.is_valid_county(Some(state), Some(value)),
            None => true,
        },
        Check::Length => kind.is_none_or(|kind| fits_length(kind, value)),
        Check::Digits => kind.is_none_or(|kind| parses_as(kind, value)),
        Check::Precision => kind.is_none_or(|kind| fits_precision(kind, value)),
        Check::Range { min, max } => parse_f64(value).is_none_or(|n| (min..=max).contains(&n)),
        Check::Date => parse_date(value).is_some(),
    }
}

/// Text fits its character cap; a number fits its total-digit budget.
/// Unparseable numbers are left to the digits rule.
fn fits_length(kind: FieldKind, value: &str) -> bool {
    match kind {
        FieldKind::Text { max } | FieldKind::Truncate { max } => value.chars().count() <= max,
        FieldKind::Numeric { digits, .. } | FieldKind::Quantity { digits } => {
            DecimalText::parse(value).is_none_or(|d| d.total_digits() <= usize::from(digits))
        }
        FieldKind::Date => true,
    }
}

fn parses_as(kind: FieldKind, value: &str) -> bool {
    match kind {
        FieldKind::Numeric { .. } => DecimalText::parse(value).is_some(),
        FieldKind::Quantity { .. } => {
            DecimalText::parse(value).is_some_and(|d| !d.negative && d.fraction.is_empty())
        }
        FieldKind::Text { .. } | FieldKind::Truncate { .. } | FieldKind::Date => true,
    }
}

/// Decimal places within budget. Skipped when the value already exceeds
/// its total-digit budget, which the length rule reports.
fn fits_precision(kind: FieldKind, value: &str) -> bool {
    let FieldKind::Numeric { digits, decimals } = kind else {
        return true;
    };
    DecimalText::parse(value).is_none_or(|d| {
        d.total_digits() > usize::from(digits) || d.decimal_digits() <= usize::from(decimals)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOAD_FACTOR: FieldKind = FieldKind::Numeric {
        digits: 4,
        decimals: 2,
    };

    #[test]
    fn precision_skips_values_over_length() {
        assert!(fits_precision(LOAD_FACTOR, "12.34"));
        assert!(!fits_precision(LOAD_FACTOR, "1.234"));
        assert!(fits_precision(LOAD_FACTOR, "12.345"));
        assert!(!fits_length(LOAD_FACTOR, "12.345"));
    }

    #[test]
    fn length_counts_significant_digits() {
        assert!(fits_length(LOAD_FACTOR, "0012.34"));
        assert!(!fits_length(LOAD_FACTOR, "123.45"));
        assert!(fits_length(LOAD_FACTOR, "abc"));
        assert!(fits_length(FieldKind::Text { max: 3 }, "ÅBC"));
    }

    #[test]
    fn quantities_are_whole_and_non_negative() {
        let quantity = FieldKind::Quantity { digits: 8 };
        assert!(parses_as(quantity, "120"));
        assert!(!parses_as(quantity, "-1"));
        assert!(!parses_as(quantity, "1.5"));
    }
}
