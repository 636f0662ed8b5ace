//! Rule engine, bundle selection and fatal key collection.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use proptest::prelude::*;

use nbi_model::{
    BridgeKey, BridgeRecord, Element, EntityKey, EntityKind, Feature, FatalKey, PostingStatus,
    RecordId, Route, Severity, SpanSet,
};
use nbi_standards::{CodeListCache, CsvReferenceSource, reference_root};
use nbi_validate::{
    CodeTally, RuleContext, RuleEngine, RuleRegistry, collect_fatal_keys, cross_check,
    latest_posting_status,
};

fn cache() -> CodeListCache {
    let source = CsvReferenceSource::open(&reference_root()).expect("reference data");
    CodeListCache::new(source)
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).expect("date")
}

fn bridge(id: usize, state: &str, number: &str) -> BridgeRecord {
    let value = |s: &str| (!s.is_empty()).then(|| s.to_string());
    BridgeRecord {
        id: RecordId(id),
        state_code: value(state),
        bridge_number: value(number),
        county_code: Some("037".into()),
        ..BridgeRecord::default()
    }
}

fn fired(record: &BridgeRecord, cache: &CodeListCache) -> (bool, BTreeSet<String>) {
    let registry = RuleRegistry::with_default_rules();
    let engine = RuleEngine::with_defaults(&registry);
    let ctx = RuleContext::new(cache, as_of());
    let mut tally = CodeTally::new();
    let evaluation = engine
        .evaluate_bridge(record, &ctx, &mut tally)
        .expect("default workflows");
    let names = evaluation.failures.into_iter().map(|f| f.rule).collect();
    (evaluation.border, names)
}

#[test]
fn registry_names_are_unique() {
    let registry = RuleRegistry::with_default_rules();
    let names: BTreeSet<_> = registry.iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(names.len(), registry.len());
    assert!(registry.get("BID01_REQUIRED").is_some());
    assert!(registry.get("BLR06_PRECISION").is_some());
    assert!(registry.get("BORDER_NO_OTHER_DATA").is_some());
}

#[test]
fn every_lookup_list_is_in_the_reference_data() {
    let cache = cache();
    let registry = RuleRegistry::with_default_rules();
    let lists = registry.lookup_lists();
    assert!(!lists.is_empty());
    cache.preload(lists.iter().copied()).expect("every list loads");
}

#[test]
fn waterway_without_navigation_indicator_fires() {
    let cache = cache();
    let mut record = bridge(0, "06", "B-100");
    record.features.push(Feature {
        feature_type: Some("W01".into()),
        feature_location: Some("B".into()),
        ..Feature::default()
    });

    let (border, names) = fired(&record, &cache);
    assert!(!border);
    assert!(names.contains("BN01_NAVIGATION_SET"));
    assert!(names.contains("BC11_REQUIRED_OVER_WATER"));
}

#[test]
fn border_bridge_uses_the_narrow_bundle() {
    let cache = cache();
    let mut record = bridge(0, "06", "B-200");
    record.border_state_or_country = Some("32".into());
    record.border_lead_state = Some("32".into());
    record.border_bridge_number = Some("NV-200".into());
    record.deck_condition = Some("7".into());
    record.span_sets.push(SpanSet {
        configuration_designation: Some("M01".into()),
        span_material: Some("C01".into()),
        ..SpanSet::default()
    });

    let (border, names) = fired(&record, &cache);
    assert!(border);
    assert!(names.contains("BORDER_NO_OTHER_DATA"));
    assert!(names.contains("BORDER_NO_SPAN_SETS_DATA"));
    assert!(!names.contains("BLR06_REQUIRED"));
    assert!(!names.contains("BSP02_REQUIRED"));
    assert!(!names.contains("BID01_REQUIRED"));
}

#[test]
fn fallback_codes_are_tallied_not_failed() {
    let cache = cache();
    let registry = RuleRegistry::with_default_rules();
    let engine = RuleEngine::with_defaults(&registry);
    let ctx = RuleContext::new(&cache, as_of());
    let mut record = bridge(0, "06", "B-300");
    record.span_sets.push(SpanSet {
        configuration_designation: Some("M01".into()),
        span_material: Some("S123".into()),
        ..SpanSet::default()
    });

    let mut tally = CodeTally::new();
    let evaluation = engine
        .evaluate_bridge(&record, &ctx, &mut tally)
        .expect("evaluate");
    assert!(!evaluation.failures.iter().any(|f| f.rule == "BSP04_LOOKUP"));
    assert_eq!(tally.count("BSP04", "S123"), 1);
}

#[test]
fn blank_identity_records_get_distinct_fatal_keys() {
    let cache = cache();
    let registry = RuleRegistry::with_default_rules();
    let engine = RuleEngine::with_defaults(&registry);
    let ctx = RuleContext::new(&cache, as_of());
    let records = vec![bridge(0, "", ""), bridge(1, "", "")];

    let mut tally = CodeTally::new();
    let failures: Vec<_> = records
        .iter()
        .flat_map(|record| {
            engine
                .evaluate_bridge(record, &ctx, &mut tally)
                .expect("evaluate")
                .failures
        })
        .collect();
    let keys = collect_fatal_keys(&records, &failures);

    let bridges: Vec<_> = keys.keys(EntityKind::Bridge).collect();
    assert_eq!(bridges.len(), 2);
    assert_ne!(bridges[0], bridges[1]);
    assert_eq!(keys.fallback_ids().len(), 2);
}

#[test]
fn fatal_bridge_takes_its_children() {
    let cache = cache();
    let registry = RuleRegistry::with_default_rules();
    let engine = RuleEngine::with_defaults(&registry);
    let ctx = RuleContext::new(&cache, as_of());
    let mut record = bridge(0, "06", "");
    let mut feature = Feature {
        feature_type: Some("H01".into()),
        ..Feature::default()
    };
    feature.routes.push(Route {
        route_designation: Some("1".into()),
        ..Route::default()
    });
    record.features.push(feature);

    let mut tally = CodeTally::new();
    let failures = engine
        .evaluate_bridge(&record, &ctx, &mut tally)
        .expect("evaluate")
        .failures;
    let keys = collect_fatal_keys(std::slice::from_ref(&record), &failures);

    let owner = BridgeKey::new(Some("06"), None);
    assert!(keys.contains(&FatalKey::new(
        owner.clone(),
        EntityKey::new(EntityKind::Feature, ["H01"]),
    )));
    assert!(keys.contains(&FatalKey::new(
        owner,
        EntityKey::new(EntityKind::Route, ["H01", "1"]),
    )));
}

fn status(code: &str, changed: &str) -> PostingStatus {
    PostingStatus {
        load_posting_status: Some(code.into()),
        status_change_date: Some(changed.into()),
        ..PostingStatus::default()
    }
}

#[test]
fn undated_posting_status_means_closed() {
    let mut record = bridge(0, "06", "B-400");
    record.operating_load_rating_factor = Some("0.10".into());
    record.posting_statuses.push(status("A", "2024-01-01"));

    assert_eq!(latest_posting_status(&record), "K");
    assert!(cross_check(&record).is_empty());
}

#[test]
fn latest_dated_status_drives_safety_checks() {
    let mut record = bridge(0, "06", "B-500");
    record.operating_load_rating_factor = Some("0.25".into());
    record.controlling_legal_load_rating_factor = Some("0.90".into());
    record.superstructure_condition = Some("N".into());
    record.substructure_condition = Some("2".into());
    record.posting_statuses.push(status("K", "20200101"));
    record.posting_statuses.push(status("A", "20230615"));

    assert_eq!(latest_posting_status(&record), "A");
    let failures = cross_check(&record);
    let names: Vec<_> = failures.iter().map(|f| f.rule.as_str()).collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "SAFETY_OPERATING_CLOSE",
        "SAFETY_OPERATING_POST",
        "SAFETY_LEGAL_POST",
        "SAFETY_CRITICAL_CONDITION",
    ]
    "#);
    assert!(failures.iter().all(|f| f.severity == Severity::Safety && !f.fatal));
}

#[test]
fn multi_value_fallback_tallies_each_code() {
    let cache = cache();
    let registry = RuleRegistry::with_default_rules();
    let engine = RuleEngine::with_defaults(&registry);
    let ctx = RuleContext::new(&cache, as_of());
    let mut record = bridge(0, "06", "B-310");
    record.span_sets.push(SpanSet {
        configuration_designation: Some("M01".into()),
        span_material: Some("C01|S12".into()),
        ..SpanSet::default()
    });

    let mut tally = CodeTally::new();
    engine
        .evaluate_bridge(&record, &ctx, &mut tally)
        .expect("evaluate");
    assert_eq!(tally.count("BSP04", "S12"), 1);
    assert_eq!(tally.count("BSP04", "C01|S12"), 0);
    assert_eq!(tally.total(), 1);
}

fn span_set(designation: &str, span_type: &str, deck_material: &str) -> SpanSet {
    SpanSet {
        configuration_designation: Some(designation.into()),
        span_type: Some(span_type.into()),
        deck_material: Some(deck_material.into()),
        ..SpanSet::default()
    }
}

fn element(number: &str) -> Element {
    Element {
        element_number: Some(number.into()),
        parent_number: Some("0".into()),
        total_quantity: Some("1".into()),
        ..Element::default()
    }
}

#[test]
fn culvert_element_needs_a_culvert_span() {
    let cache = cache();
    let mut record = bridge(0, "06", "B-600");
    record.elements.push(element("241"));

    let (_, names) = fired(&record, &cache);
    assert!(
        !names.contains("BE01_CULVERT_SPAN"),
        "no span sets means the rule cannot validate"
    );

    record.span_sets.push(span_set("M01", "S01", "C01"));
    let (_, names) = fired(&record, &cache);
    assert!(names.contains("BE01_CULVERT_SPAN"));

    record.span_sets.push(span_set("M02", "C01", "N01"));
    let (_, names) = fired(&record, &cache);
    assert!(!names.contains("BE01_CULVERT_SPAN"));
}

#[test]
fn deck_element_needs_a_span_with_a_deck() {
    let cache = cache();
    let mut record = bridge(0, "06", "B-700");
    record.elements.push(element("12"));
    record.span_sets.push(span_set("M01", "S01", "N01"));

    let (_, names) = fired(&record, &cache);
    assert!(names.contains("BE01_DECK_MATERIAL"));

    record.span_sets.push(span_set("M02", "S01", "C01"));
    let (_, names) = fired(&record, &cache);
    assert!(!names.contains("BE01_DECK_MATERIAL"));
}

#[test]
fn overlapping_deck_rating_rules_fire_independently() {
    let cache = cache();
    let mut record = bridge(0, "06", "B-800");
    record.deck_condition = Some("5".into());
    record.span_sets.push(span_set("M01", "S01", "N01"));

    let (_, names) = fired(&record, &cache);
    assert!(names.contains("BC01_DECK_PRESENT"));
    assert!(names.contains("BC01_NO_DECK"));

    record.deck_condition = Some("N".into());
    let (_, names) = fired(&record, &cache);
    assert!(!names.contains("BC01_DECK_PRESENT"));
    assert!(!names.contains("BC01_NO_DECK"));
}

#[test]
fn critical_condition_names_the_offending_component() {
    let mut record = bridge(0, "06", "B-900");
    record.superstructure_condition = Some("6".into());
    record.substructure_condition = Some("2".into());
    record.posting_statuses.push(status("B", "20240101"));

    let failures = cross_check(&record);
    let critical = failures
        .iter()
        .find(|f| f.rule == "SAFETY_CRITICAL_CONDITION")
        .expect("critical condition");
    assert_eq!(critical.item, "BC03");
    assert_eq!(critical.origin.value.as_deref(), Some("2"));
}

fn field_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[0-9]{1,6}(\\.[0-9]{1,4})?".prop_map(Some),
        "[A-Z][0-9]{2}".prop_map(Some),
        "[A-Za-z0-9 ]{0,20}".prop_map(Some),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn evaluation_is_deterministic(
        values in proptest::collection::vec(field_value(), 12),
    ) {
        use nbi_model::Entity;

        let cache = cache();
        let registry = RuleRegistry::with_default_rules();
        let engine = RuleEngine::with_defaults(&registry);
        let ctx = RuleContext::new(&cache, as_of());

        let mut record = bridge(0, "06", "B-600");
        let items = ["BL05", "BL06", "BG01", "BG02", "BLR05", "BLR06", "BC01", "BC02",
            "BC12", "BC13", "BCL01", "BW01"];
        for (item, value) in items.iter().zip(values) {
            record.set_field(item, value);
        }

        let mut first_tally = CodeTally::new();
        let first = engine.evaluate_bridge(&record, &ctx, &mut first_tally).expect("evaluate");
        let mut second_tally = CodeTally::new();
        let second = engine.evaluate_bridge(&record, &ctx, &mut second_tally).expect("evaluate");
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_tally, second_tally);
    }
}
