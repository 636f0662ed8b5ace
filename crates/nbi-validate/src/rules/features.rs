//! Feature and route rules.

use std::sync::LazyLock;

use regex::Regex;

use nbi_model::{EntityKind, Feature, Severity, trimmed};

use super::check::{Check, Rule, Scope};
use super::support::{not_greater, number, year_not_future};
use crate::context::RuleContext;
use crate::input::RuleInput;

static URBAN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("Invalid urban code regex"));

const HIGHWAY_ITEMS: &[&str] = &[
    "BH01", "BH02", "BH03", "BH04", "BH05", "BH06", "BH07", "BH08", "BH09", "BH10", "BH11",
    "BH12", "BH13", "BH14", "BH15", "BH16", "BH17", "BH18",
];

const NAVIGATION_ITEMS: &[&str] = &["BN01", "BN02", "BN03", "BN04", "BN05", "BN06"];

/// Required once a waterway is declared navigable.
const NAVIGABLE_ITEMS: &[&str] = &["BN02", "BN04", "BN05"];

const NAVIGABLE: &str = "Y";

/// Route type for a route off any numbered system.
const UNNUMBERED_ROUTE: &str = "0";

pub fn feature_rules() -> Vec<Rule> {
    let kind = EntityKind::Feature;
    vec![
        Rule::new("BF01_REQUIRED", kind, "BF01", Check::Required)
            .identity()
            .describe("Feature Type is required"),
        Rule::new("BF02_REQUIRED", kind, "BF02", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Feature Location is required"),
        Rule::new("BH01_REQUIRED", kind, "BH01", Check::Custom(highway_classified))
            .scope(Scope::Ordinary)
            .describe("Functional Classification is required for a highway feature"),
        Rule::new("BH02_PATTERN", kind, "BH02", Check::Pattern(&URBAN_CODE))
            .scope(Scope::Ordinary)
            .describe("Urban Code must be five digits"),
        Rule::new("BH08_REQUIRED", kind, "BH08", Check::Custom(highway_lanes))
            .scope(Scope::Ordinary)
            .describe("Lanes on Highway is required for a highway feature"),
        Rule::new("BH09_REQUIRED", kind, "BH09", Check::Custom(highway_traffic))
            .scope(Scope::Ordinary)
            .describe("Annual Average Daily Traffic is required for a highway feature"),
        Rule::new(
            "BH10_NOT_GREATER_THAN_BH09",
            kind,
            "BH10",
            Check::Custom(trucks_within_traffic),
        )
        .scope(Scope::Ordinary)
        .describe("Truck traffic must not exceed Annual Average Daily Traffic"),
        Rule::new("BH11_NOT_FUTURE", kind, "BH11", Check::Custom(traffic_year_past))
            .scope(Scope::Ordinary)
            .describe("Year of Annual Average Daily Traffic must not be in the future"),
        Rule::new("BH_ONLY_HIGHWAY", kind, "BF01", Check::Custom(highway_items_on_highway))
            .severity(Severity::Flag)
            .scope(Scope::Ordinary)
            .describe("Highway items are reported on a feature that is not a highway"),
        Rule::new("BRR01_REQUIRED", kind, "BRR01", Check::Custom(railroad_service))
            .scope(Scope::Ordinary)
            .describe("Railroad Service Type is required for a railroad feature"),
        Rule::new("BN01_NAVIGATION_SET", kind, "BN01", Check::Custom(navigation_set))
            .scope(Scope::Ordinary)
            .describe("A waterway feature requires a complete navigation set"),
        Rule::new("BN_ONLY_WATERWAY", kind, "BF01", Check::Custom(navigation_on_waterway))
            .severity(Severity::Flag)
            .scope(Scope::Ordinary)
            .describe("Navigation items are reported on a feature that is not a waterway"),
        Rule::new("FEATURE_ROUTE_REQUIRED", kind, "BF01", Check::Custom(highway_routed))
            .scope(Scope::Ordinary)
            .describe("A highway feature requires at least one route"),
    ]
}

pub fn route_rules() -> Vec<Rule> {
    let kind = EntityKind::Route;
    vec![
        Rule::new("BRT01_REQUIRED", kind, "BRT01", Check::Required)
            .identity()
            .describe("Route Designation is required"),
        Rule::new("BRT02_REQUIRED", kind, "BRT02", Check::Custom(numbered_route))
            .scope(Scope::Ordinary)
            .describe("Route Number is required for a route on a numbered system"),
        Rule::new("BRT04_REQUIRED", kind, "BRT04", Check::Required)
            .scope(Scope::Ordinary)
            .describe("Route Type is required"),
        Rule::new("BRT01_HIGHWAY_FEATURE", kind, "BRT01", Check::Custom(route_on_highway))
            .scope(Scope::Ordinary)
            .describe("Routes may only be reported under a highway feature"),
    ]
}

fn feature<'a>(input: &RuleInput<'a>) -> Option<&'a Feature> {
    input.feature
}

fn is_highway(input: &RuleInput<'_>) -> bool {
    feature(input).is_some_and(Feature::is_highway)
}

/// The feature type is known and is not of `kind`.
fn typed_other_than(input: &RuleInput<'_>, kind: fn(&Feature) -> bool) -> bool {
    input.value("BF01").is_some() && feature(input).is_some_and(|f| !kind(f))
}

fn highway_classified(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !is_highway(input) || input.value("BH01").is_some()
}

fn highway_lanes(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !is_highway(input) || input.value("BH08").is_some()
}

fn highway_traffic(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !is_highway(input) || input.value("BH09").is_some()
}

fn trucks_within_traffic(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    not_greater(number(input.value("BH10")), number(input.value("BH09")))
}

fn traffic_year_past(input: &RuleInput<'_>, ctx: &RuleContext<'_>) -> bool {
    year_not_future(input.value("BH11"), ctx.as_of)
}

fn highway_items_on_highway(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !typed_other_than(input, Feature::is_highway)
        || HIGHWAY_ITEMS.iter().all(|item| input.value(item).is_none())
}

fn railroad_service(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !feature(input).is_some_and(Feature::is_railroad) || input.value("BRR01").is_some()
}

/// A waterway carries at least the navigable indicator; a navigable one also
/// carries its clearances.
fn navigation_set(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    if !feature(input).is_some_and(Feature::is_waterway) {
        return true;
    }
    match input.value("BN01") {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case(NAVIGABLE) => {
            NAVIGABLE_ITEMS.iter().all(|item| input.value(item).is_some())
        }
        Some(_) => true,
    }
}

fn navigation_on_waterway(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    !typed_other_than(input, Feature::is_waterway)
        || NAVIGATION_ITEMS.iter().all(|item| input.value(item).is_none())
}

fn highway_routed(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    feature(input).is_none_or(|f| !f.is_highway() || !f.routes.is_empty())
}

fn numbered_route(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    input.value("BRT04").is_none_or(|kind| kind == UNNUMBERED_ROUTE)
        || input.value("BRT02").is_some()
}

fn route_on_highway(input: &RuleInput<'_>, _: &RuleContext<'_>) -> bool {
    feature(input).is_none_or(|owner| {
        trimmed(owner.feature_type.as_deref()).is_none() || owner.is_highway()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbi_model::{BridgeRecord, Route};
    use nbi_standards::{CodeListCache, InMemoryReferenceSource};

    fn evaluate(predicate: fn(&RuleInput<'_>, &RuleContext<'_>) -> bool, f: &Feature) -> bool {
        let cache = CodeListCache::new(InMemoryReferenceSource::new());
        let ctx = RuleContext::new(&cache, chrono::NaiveDate::MIN);
        let bridge = BridgeRecord::default();
        predicate(&RuleInput::feature(f, &bridge), &ctx)
    }

    #[test]
    fn waterway_without_indicator_has_no_navigation_set() {
        let mut waterway = Feature {
            feature_type: Some("W01".into()),
            ..Feature::default()
        };
        assert!(!evaluate(navigation_set, &waterway));

        waterway.navigable_waterway = Some("Y".into());
        waterway.navigation_vertical_clearance = Some("12.0".into());
        assert!(!evaluate(navigation_set, &waterway));

        waterway.navigation_channel_width = Some("40.0".into());
        waterway.navigation_horizontal_clearance = Some("35.0".into());
        assert!(evaluate(navigation_set, &waterway));
    }

    #[test]
    fn highway_needs_a_route() {
        let mut highway = Feature {
            feature_type: Some("H01".into()),
            ..Feature::default()
        };
        assert!(!evaluate(highway_routed, &highway));
        highway.routes.push(Route::default());
        assert!(evaluate(highway_routed, &highway));
    }

    #[test]
    fn navigation_items_flagged_off_waterways() {
        let railroad = Feature {
            feature_type: Some("R01".into()),
            navigable_waterway: Some("N".into()),
            ..Feature::default()
        };
        assert!(!evaluate(navigation_on_waterway, &railroad));
        assert!(!evaluate(railroad_service, &railroad));
    }
}
