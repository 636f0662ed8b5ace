//! Registry of every known rule, indexed by name.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use nbi_model::EntityKind;

use super::check::{Check, Rule};
use super::defined_rules;
use super::generator::generated_rules;
use crate::border::border_rules;

/// Rules in registration order plus a name index.
///
/// Registration order is the order default bundles evaluate in.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<Rule>>,
    index: HashMap<String, usize>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand-written rules, then border rules, then the generated format and
    /// lookup rules.
    pub fn with_default_rules() -> Self {
        Self::from_rules(
            defined_rules()
                .into_iter()
                .chain(border_rules())
                .chain(generated_rules()),
        )
    }

    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut registry = Self::new();
        for rule in rules {
            registry.insert(rule);
        }
        registry
    }

    /// Insert a rule. A rule with the same name is replaced in place.
    pub fn insert(&mut self, rule: Rule) {
        let rule = Arc::new(rule);
        match self.index.get(&rule.name) {
            Some(&position) => self.rules[position] = rule,
            None => {
                self.index.insert(rule.name.clone(), self.rules.len());
                self.rules.push(rule);
            }
        }
    }

    /// Get rule by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Rule>> {
        self.index.get(name).map(|&position| &self.rules[position])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over all rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.iter()
    }

    /// Rules of one dataset in registration order.
    pub fn rules_for(&self, kind: EntityKind) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.iter().filter(move |rule| rule.kind == kind)
    }

    /// Every code list a lookup rule refers to, for preloading.
    pub fn lookup_lists(&self) -> BTreeSet<&'static str> {
        self.rules
            .iter()
            .filter_map(|rule| match rule.check {
                Check::Lookup(list) => Some(list),
                _ => None,
            })
            .collect()
    }
}
