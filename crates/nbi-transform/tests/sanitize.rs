//! Sanitized twins and removal flags.

use proptest::prelude::*;

use nbi_model::{
    BridgeKey, BridgeRecord, DecimalText, Element, Entity, EntityKey, EntityKind, FatalKey,
    FatalKeys, Feature, FieldKind, RecordId, RecordStatus, Route, Work, parse_date,
};
use nbi_transform::{SanitizeSummary, sanitize_into, sanitize_record, sanitize_value};

fn bridge() -> BridgeRecord {
    BridgeRecord {
        id: RecordId(4),
        state_code: Some("06".into()),
        bridge_number: Some("B-1".into()),
        ..BridgeRecord::default()
    }
}

#[test]
fn load_rating_factor_is_cut_not_rounded() {
    let mut record = bridge();
    record.operating_load_rating_factor = Some("12.345".into());
    record.inventory_load_rating_factor = Some("123.4".into());

    let mut summary = SanitizeSummary::new();
    let twin = sanitize_record(&record, &FatalKeys::new(), &mut summary);
    assert_eq!(twin.operating_load_rating_factor.as_deref(), Some("12.34"));
    assert_eq!(twin.inventory_load_rating_factor, None);
    assert_eq!(twin.status, Some(RecordStatus::Active));
    assert_eq!(twin.id, record.id);

    let counts = summary.get(EntityKind::Bridge);
    assert_eq!(counts.truncated, 1);
    assert_eq!(counts.nulled, 1);
}

#[test]
fn element_quantities_are_never_null() {
    let mut record = bridge();
    record.elements.push(Element {
        element_number: Some("12".into()),
        total_quantity: Some("250.7".into()),
        cs1_quantity: Some("-3".into()),
        cs2_quantity: None,
        cs3_quantity: Some("123456789".into()),
        cs4_quantity: Some("7".into()),
        ..Element::default()
    });

    let mut summary = SanitizeSummary::new();
    let twin = sanitize_record(&record, &FatalKeys::new(), &mut summary);
    let element = &twin.elements[0];
    assert_eq!(element.total_quantity.as_deref(), Some("250"));
    assert_eq!(element.cs1_quantity.as_deref(), Some("0"));
    assert_eq!(element.cs2_quantity.as_deref(), Some("0"));
    assert_eq!(element.cs3_quantity.as_deref(), Some("0"));
    assert_eq!(element.cs4_quantity.as_deref(), Some("7"));
    insta::assert_json_snapshot!(summary.get(EntityKind::Element), @r#"
    {
      "nulled": 0,
      "truncated": 1,
      "zeroed": 3,
      "removed": 0
    }
    "#);
}

#[test]
fn fatal_entities_are_kept_and_marked_removed() {
    let mut record = bridge();
    let mut feature = Feature {
        feature_type: Some("H01".into()),
        ..Feature::default()
    };
    feature.routes.push(Route {
        route_designation: Some("1".into()),
        ..Route::default()
    });
    feature.routes.push(Route {
        route_designation: Some("2".into()),
        ..Route::default()
    });
    record.features.push(feature);
    record.work.push(Work {
        year_work_performed: Some("1999".into()),
        ..Work::default()
    });

    let owner = BridgeKey::new(Some("06"), Some("B-1"));
    let mut fatal = FatalKeys::new();
    fatal.insert(FatalKey::new(
        owner.clone(),
        EntityKey::new(EntityKind::Route, ["H01", "2"]),
    ));
    fatal.insert(FatalKey::new(owner, EntityKey::new(EntityKind::Work, ["1999"])));

    let mut summary = SanitizeSummary::new();
    let mut twin = record.empty_twin();
    sanitize_into(&record, &mut twin, &fatal, &mut summary);

    assert_eq!(twin.status, Some(RecordStatus::Active));
    assert_eq!(twin.features[0].status, Some(RecordStatus::Active));
    let routes: Vec<_> = twin.features[0].routes.iter().map(|r| r.status).collect();
    assert_eq!(
        routes,
        [Some(RecordStatus::Active), Some(RecordStatus::Removed)]
    );
    assert_eq!(twin.work.len(), 1);
    assert_eq!(twin.work[0].status, Some(RecordStatus::Removed));
    assert_eq!(summary.total().removed, 2);
}

#[test]
fn blank_identity_record_uses_its_fallback_key() {
    let record = BridgeRecord {
        id: RecordId(9),
        ..BridgeRecord::default()
    };
    let mut fatal = FatalKeys::new();
    let synthetic = fatal.register_bridge(record.id, &record.key());
    fatal.insert(FatalKey::new(synthetic, record.entity_key()));

    let twin = sanitize_record(&record, &fatal, &mut SanitizeSummary::new());
    assert_eq!(twin.status, Some(RecordStatus::Removed));

    let other = BridgeRecord {
        id: RecordId(10),
        ..BridgeRecord::default()
    };
    let twin = sanitize_record(&other, &fatal, &mut SanitizeSummary::new());
    assert_eq!(twin.status, Some(RecordStatus::Active));
}

fn field_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        (1usize..20).prop_map(|max| FieldKind::Text { max }),
        (1usize..20).prop_map(|max| FieldKind::Truncate { max }),
        (1u8..10)
            .prop_flat_map(|digits| (Just(digits), 0..=digits))
            .prop_map(|(digits, decimals)| FieldKind::Numeric { digits, decimals }),
        (1u8..10).prop_map(|digits| FieldKind::Quantity { digits }),
        Just(FieldKind::Date),
    ]
}

fn raw_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[ ]{0,2}".prop_map(Some),
        "[+-]?[0-9]{0,8}(\\.[0-9]{0,5})?".prop_map(Some),
        "(19|20)[0-9]{2}[01][0-9][0-3][0-9]".prop_map(Some),
        "[A-Za-z0-9 .-]{0,25}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn sanitized_values_fit_their_budget(kind in field_kind(), value in raw_value()) {
        let (out, _) = sanitize_value(kind, value.as_deref());
        match kind {
            FieldKind::Text { max } | FieldKind::Truncate { max } => {
                if let Some(out) = out {
                    prop_assert!(!out.trim().is_empty());
                    prop_assert!(out.chars().count() <= max);
                }
            }
            FieldKind::Numeric { digits, decimals } => {
                if let Some(out) = out {
                    let decimal = DecimalText::parse(&out).expect("numeric output parses");
                    prop_assert!(decimal.decimal_digits() <= usize::from(decimals));
                    prop_assert!(decimal.total_digits() <= usize::from(digits));
                }
            }
            FieldKind::Quantity { digits } => {
                let out = out.expect("quantities are never null");
                prop_assert!(out.bytes().all(|b| b.is_ascii_digit()));
                prop_assert!(out.len() <= usize::from(digits).max(1));
            }
            FieldKind::Date => {
                if let Some(out) = out {
                    prop_assert!(parse_date(&out).is_some());
                }
            }
        }
    }

    #[test]
    fn fitting_values_pass_through(value in "[1-9][0-9]{0,1}\\.[0-9]{2}") {
        let kind = FieldKind::Numeric { digits: 4, decimals: 2 };
        let (out, change) = sanitize_value(kind, Some(&value));
        prop_assert_eq!(out.as_deref(), Some(value.as_str()));
        prop_assert_eq!(change, None);
    }
}
