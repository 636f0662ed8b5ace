//! Submission parsing and malformed-input detection.

use nbi_ingest::{IngestError, parse_submission, read_submission};
use nbi_model::{Entity, RecordId};

#[test]
fn scalars_are_normalized_and_children_nested() {
    let submission = parse_submission(
        r#"{
            "submitter_state": "06",
            "bridges": [
                {
                    "BL01": "06",
                    "BID01": "B-1",
                    "BLR06": 0.95,
                    "BC01": 7,
                    "BL05": null,
                    "features": [
                        {"BF01": "H01", "BN01": false, "routes": [{"BRT01": 1}]}
                    ],
                    "work": null
                },
                {"BL01": "06", "BID01": "B-2"}
            ]
        }"#,
    )
    .expect("submission");

    assert_eq!(submission.submitter_state.as_deref(), Some("06"));
    assert_eq!(submission.len(), 2);

    let first = &submission.bridges[0];
    assert_eq!(first.id, RecordId(0));
    assert_eq!(first.field("BLR06"), Some("0.95"));
    assert_eq!(first.field("BC01"), Some("7"));
    assert_eq!(first.field("BL05"), None);
    assert_eq!(first.features[0].field("BN01"), Some("N"));
    assert_eq!(first.features[0].routes[0].field("BRT01"), Some("1"));
    assert!(first.work.is_empty());
    assert_eq!(submission.bridges[1].id, RecordId(1));
}

#[test]
fn unknown_items_and_status_are_dropped() {
    let submission = parse_submission(
        r#"{"bridges": [{"BL01": "06", "XYZ99": "?", "status": "Removed",
            "elements": [{"BE01": "12", "status": "Active"}]}]}"#,
    )
    .expect("submission");
    let record = &submission.bridges[0];
    assert_eq!(record.status, None);
    assert_eq!(record.elements[0].status, None);
    assert_eq!(submission.submitter_state, None);
}

#[test]
fn malformed_submissions_are_rejected() {
    let cases = [
        ("not json", "Json"),
        ("[]", "NotAnObject"),
        (r#"{"submitter_state": "06"}"#, "MissingBridges"),
        (r#"{"bridges": {}}"#, "NotAnArray"),
        (r#"{"bridges": [12]}"#, "NotAnObject"),
        (r#"{"bridges": [{"features": "H01"}]}"#, "NotAnArray"),
        (r#"{"bridges": [{"features": [[]]}]}"#, "NotAnObject"),
        (r#"{"bridges": [{"BL01": ["06"]}]}"#, "NotAScalar"),
    ];
    for (text, expected) in cases {
        let err = parse_submission(text).expect_err(text);
        let variant = match err {
            IngestError::Json { .. } => "Json",
            IngestError::NotAnObject { .. } => "NotAnObject",
            IngestError::MissingBridges => "MissingBridges",
            IngestError::NotAnArray { .. } => "NotAnArray",
            IngestError::NotAScalar { .. } => "NotAScalar",
            other => panic!("unexpected error for {text}: {other}"),
        };
        assert_eq!(variant, expected, "{text}");
    }
}

#[test]
fn error_messages_name_the_location() {
    let err = parse_submission(r#"{"bridges": [{}, {"work": [{"BW02": {"y": 1}}]}]}"#)
        .expect_err("nested object");
    insta::assert_snapshot!(
        err.to_string(),
        @"item BW02 at $.bridges[1].work[0] holds an object, expected a scalar"
    );
}

#[test]
fn reads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("batch.json");
    std::fs::write(&path, r#"{"submitter_state": "32", "bridges": []}"#).expect("write");

    let submission = read_submission(&path).expect("submission");
    assert!(submission.is_empty());
    assert_eq!(submission.submitter_state.as_deref(), Some("32"));

    let missing = read_submission(&dir.path().join("nope.json")).expect_err("missing");
    assert!(matches!(missing, IngestError::FileNotFound { .. }));
}
