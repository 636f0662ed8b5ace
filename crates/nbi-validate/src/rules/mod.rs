//! Rule definitions and the registry that names them.
//!
//! Format and lookup rules are generated from the field schemas; the
//! per-dataset modules add presence, cross-field and cross-dataset rules.

mod bridge;
mod check;
mod elements;
mod features;
mod generator;
mod inspections;
mod lookups;
mod postings;
mod registry;
mod structures;
pub(crate) mod support;
mod work;

pub use bridge::{NO_DECK, classification_for};
pub use check::{Check, Predicate, Rule, Scope};
pub use generator::{generated_rules, lookup_list};
pub use lookups::LOOKUPS;
pub use registry::RuleRegistry;

/// Hand-written rules of every dataset, primary record first.
pub fn defined_rules() -> Vec<Rule> {
    let mut rules = bridge::rules();
    rules.extend(features::feature_rules());
    rules.extend(features::route_rules());
    rules.extend(elements::rules());
    rules.extend(inspections::rules());
    rules.extend(postings::evaluation_rules());
    rules.extend(postings::status_rules());
    rules.extend(structures::span_rules());
    rules.extend(structures::substructure_rules());
    rules.extend(work::rules());
    rules
}
