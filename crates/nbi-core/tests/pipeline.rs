//! End-to-end batch validation.

use std::sync::mpsc;

use chrono::NaiveDate;

use nbi_core::{
    BatchOutcome, BatchValidator, CancellationToken, NoProgress, PipelineError,
    SUBMITTER_STATE_MISMATCH, ValidationOptions,
};
use nbi_ingest::{Submission, parse_submission};
use nbi_model::{
    BridgeRecord, Entity, EntityKind, FatalKey, Feature, RecordId, RecordStatus, Route,
};
use nbi_standards::{CodeListCache, CsvReferenceSource, reference_root};

fn cache() -> CodeListCache {
    let source = CsvReferenceSource::open(&reference_root()).expect("reference data");
    CodeListCache::new(source)
}

fn options() -> ValidationOptions {
    ValidationOptions::default().with_as_of(NaiveDate::from_ymd_opt(2026, 6, 30).expect("date"))
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

fn submission(state: &str, bridges: Vec<BridgeRecord>) -> Submission {
    Submission {
        submitter_state: Some(state.into()),
        bridges,
    }
}

#[test]
fn duplicate_route_is_reported_and_absent_from_the_twin() {
    let cache = cache();
    let validator = BatchValidator::new(&cache, options()).expect("validator");

    let mut record = bridge(0, "06", "B-100");
    let mut feature = Feature {
        feature_type: Some("H01".into()),
        ..Feature::default()
    };
    for number in ["00101", "00999"] {
        feature.routes.push(Route {
            route_designation: Some("1".into()),
            route_number: Some(number.into()),
            ..Route::default()
        });
    }
    record.features.push(feature);

    let result = validator
        .validate(submission("06", vec![record]), &CancellationToken::new(), &NoProgress)
        .expect("batch");

    assert_eq!(result.outcome, BatchOutcome::Completed);
    insta::assert_json_snapshot!(result.duplicates.entries(EntityKind::Route), @r#"
    [
      {
        "state": "06",
        "county": "037",
        "bridge_number": "B-100",
        "key": {
          "kind": "Route",
          "parts": [
            "H01",
            "1"
          ]
        },
        "record": 0
      }
    ]
    "#);
    let routes = &result.sanitized[0].features[0].routes;
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].route_number.as_deref(), Some("00101"));
}

#[test]
fn blank_identity_records_are_removed_separately() {
    let cache = cache();
    let validator = BatchValidator::new(&cache, options()).expect("validator");
    let batch = submission(
        "06",
        vec![bridge(0, "", ""), bridge(1, "", ""), bridge(2, "06", "B-1")],
    );

    let result = validator
        .validate(batch, &CancellationToken::new(), &NoProgress)
        .expect("batch");

    assert_eq!(result.evaluated, 3);
    assert_eq!(result.fatal_keys.fallback_ids().len(), 2);
    assert_eq!(result.sanitized[0].status, Some(RecordStatus::Removed));
    assert_eq!(result.sanitized[1].status, Some(RecordStatus::Removed));
    assert!(result.affected_records.contains(&RecordId(0)));
    assert!(result.affected_records.contains(&RecordId(1)));
    assert!(result.has_fatal());
}

#[test]
fn removal_flags_follow_the_fatal_keys() {
    let cache = cache();
    let validator = BatchValidator::new(&cache, options()).expect("validator");

    let mut record = bridge(0, "06", "B-200");
    record.features.push(Feature {
        feature_type: Some("H01".into()),
        routes: vec![Route::default()],
        ..Feature::default()
    });
    record.features.push(Feature::default());

    let result = validator
        .validate(submission("06", vec![record.clone()]), &CancellationToken::new(), &NoProgress)
        .expect("batch");

    let owner = record.key();
    let twin = &result.sanitized[0];
    for (feature, sanitized) in record.features.iter().zip(&twin.features) {
        let fatal = result
            .fatal_keys
            .contains(&FatalKey::new(owner.clone(), feature.entity_key()));
        assert_eq!(sanitized.status == Some(RecordStatus::Removed), fatal);
        for (route, sanitized) in feature.routes.iter().zip(&sanitized.routes) {
            let fatal = result
                .fatal_keys
                .contains(&FatalKey::new(owner.clone(), feature.route_key(route)));
            assert_eq!(sanitized.status == Some(RecordStatus::Removed), fatal);
        }
    }
    assert_eq!(twin.features[1].status, Some(RecordStatus::Removed));
    assert_eq!(twin.features[0].routes[0].status, Some(RecordStatus::Removed));
}

#[test]
fn foreign_state_rejects_the_batch() {
    let cache = cache();
    let validator = BatchValidator::new(&cache, options()).expect("validator");
    let batch = submission("06", vec![bridge(0, "06", "B-1"), bridge(1, "32", "NV-1")]);

    let result = validator
        .validate(batch, &CancellationToken::new(), &NoProgress)
        .expect("batch");

    assert!(result.is_rejected());
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].rule, SUBMITTER_STATE_MISMATCH);
    assert!(result.sanitized.is_empty());
    assert_eq!(result.submitted, 2);
}

#[test]
fn submitter_override_wins_over_the_declared_state() {
    let cache = cache();
    let validator =
        BatchValidator::new(&cache, options().with_submitter_state("32")).expect("validator");
    let result = validator
        .validate(
            submission("06", vec![bridge(0, "06", "B-1")]),
            &CancellationToken::new(),
            &NoProgress,
        )
        .expect("batch");
    assert!(result.is_rejected());
}

#[test]
fn progress_is_reported_per_record() {
    let cache = cache();
    let validator = BatchValidator::new(&cache, options()).expect("validator");
    let batch = submission("06", vec![bridge(0, "06", "B-1"), bridge(1, "06", "B-2")]);

    let (tx, rx) = mpsc::channel();
    validator
        .validate(batch, &CancellationToken::new(), &tx)
        .expect("batch");
    drop(tx);

    let percents: Vec<_> = rx.iter().map(|progress| progress.percent()).collect();
    assert_eq!(percents, [50, 100]);
}

#[test]
fn cancelled_token_stops_at_the_record_boundary() {
    let cache = cache();
    let validator = BatchValidator::new(&cache, options()).expect("validator");
    let token = CancellationToken::new();
    token.cancel();

    let err = validator
        .validate(submission("06", vec![bridge(0, "06", "B-1")]), &token, &NoProgress)
        .expect_err("cancelled");
    assert!(matches!(
        err,
        PipelineError::Cancelled {
            processed: 0,
            total: 1
        }
    ));
}

#[test]
fn invalid_bundle_file_fails_at_startup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bundles.csv");
    std::fs::write(&path, "Workflow,Dataset,Rule\nbridge,Bridge,NOT_A_RULE\n").expect("write");

    let cache = cache();
    let err = BatchValidator::new(&cache, options().with_bundle_path(&path)).expect_err("bundle");
    assert!(matches!(err, PipelineError::Validate(_)), "{err}");
}

#[test]
fn parsed_submission_runs_end_to_end() {
    let cache = cache();
    let validator = BatchValidator::new(&cache, options()).expect("validator");
    let batch = parse_submission(
        r#"{"submitter_state": "06", "bridges": [
            {"BL01": "06", "BID01": "B-9", "BLR06": 12.345,
             "posting_statuses": [{"BPS01": "A", "BPS02": "2024-01-01"}]}
        ]}"#,
    )
    .expect("submission");

    let result = validator
        .validate(batch, &CancellationToken::new(), &NoProgress)
        .expect("batch");
    let twin = &result.sanitized[0];
    assert_eq!(twin.operating_load_rating_factor.as_deref(), Some("12.34"));
    assert_eq!(twin.posting_statuses[0].status_change_date, None);
    assert!(
        !result
            .failures
            .iter()
            .any(|failure| failure.rule.starts_with("SAFETY_")),
        "an undated posting status means closed"
    );
}
