//! Rules generated from field schemas and the lookup table.
//!
//! Every field gets the format rules its declared kind implies; every coded
//! item gets a lookup rule. Hand-written modules only add presence,
//! cross-field and cross-dataset constraints on top.

use nbi_model::{EntityKind, FieldKind, FieldSpec, Severity};

use super::check::{Check, Rule, Scope};
use super::lookups::LOOKUPS;
use crate::border::BORDER_PERMITTED;

/// Format and lookup rules for every dataset, in schema order.
pub fn generated_rules() -> Vec<Rule> {
    let mut rules = Vec::new();
    for &kind in EntityKind::all() {
        for spec in kind.schema() {
            let scope = generated_scope(kind, spec.item);
            rules.extend(
                format_rules(kind, spec)
                    .into_iter()
                    .map(|rule| rule.scope(scope)),
            );
            if let Some(list) = lookup_list(kind, spec.item) {
                let name = format!("{}_LOOKUP", spec.item);
                rules.push(
                    Rule::new(name, kind, spec.item, Check::Lookup(list))
                        .scope(scope)
                        .describe(format!("{} must be a valid {list} code", spec.name)),
                );
            }
        }
    }
    rules
}

/// Code list an item is validated against, if it is coded.
pub fn lookup_list(kind: EntityKind, item: &str) -> Option<&'static str> {
    LOOKUPS
        .iter()
        .find(|(k, i, _)| *k == kind && *i == item)
        .map(|(_, _, list)| *list)
}

/// Border records carry only identification, location and border items, and
/// border children only their keys.
fn generated_scope(kind: EntityKind, item: &str) -> Scope {
    if kind == EntityKind::Bridge && BORDER_PERMITTED.contains(&item) {
        Scope::All
    } else {
        Scope::Ordinary
    }
}

fn format_rules(kind: EntityKind, spec: &FieldSpec) -> Vec<Rule> {
    let item = spec.item;
    let name = spec.name;
    match spec.kind {
        FieldKind::Text { max } => vec![
            Rule::new(format!("{item}_LENGTH"), kind, item, Check::Length)
                .describe(format!("{name} must not exceed {max} characters")),
        ],
        FieldKind::Truncate { max } => vec![
            Rule::new(format!("{item}_LENGTH"), kind, item, Check::Length)
                .severity(Severity::Flag)
                .describe(format!("{name} longer than {max} characters will be truncated")),
        ],
        FieldKind::Numeric { digits, decimals } => vec![
            Rule::new(format!("{item}_NUMERIC"), kind, item, Check::Digits)
                .describe(format!("{name} must be numeric")),
            Rule::new(format!("{item}_LENGTH"), kind, item, Check::Length)
                .describe(format!("{name} must not exceed {digits} digits")),
            Rule::new(format!("{item}_PRECISION"), kind, item, Check::Precision).describe(
                format!("{name} must not have more than {decimals} decimal places"),
            ),
        ],
        FieldKind::Quantity { digits } => vec![
            Rule::new(format!("{item}_NUMERIC"), kind, item, Check::Digits)
                .describe(format!("{name} must be a whole, non-negative number")),
            Rule::new(format!("{item}_LENGTH"), kind, item, Check::Length)
                .describe(format!("{name} must not exceed {digits} digits")),
        ],
        FieldKind::Date => vec![
            Rule::new(format!("{item}_DATE"), kind, item, Check::Date)
                .describe(format!("{name} must be a valid YYYYMMDD date")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_get_three_rules() {
        let rules = generated_rules();
        let blr06: Vec<_> = rules
            .iter()
            .filter(|r| r.item == "BLR06")
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(blr06, ["BLR06_NUMERIC", "BLR06_LENGTH", "BLR06_PRECISION"]);
    }

    #[test]
    fn border_items_keep_their_format_rules() {
        let rules = generated_rules();
        let scope_of = |name: &str| {
            rules
                .iter()
                .find(|r| r.name == name)
                .map(|r| r.scope)
                .expect("rule")
        };
        assert_eq!(scope_of("BL05_PRECISION"), Scope::All);
        assert_eq!(scope_of("BG01_LENGTH"), Scope::Ordinary);
        assert_eq!(scope_of("BE01_LOOKUP"), Scope::Ordinary);
    }
}
