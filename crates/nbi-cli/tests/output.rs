//! Result files written by the validate command.

use chrono::NaiveDate;

use nbi_cli::output::{
    BatchSummary, DUPLICATES_FILE, FAILURES_FILE, SANITIZED_FILE, SUMMARY_FILE, write_outputs,
};
use nbi_core::{
    BatchResult, BatchValidator, CancellationToken, NoProgress, ValidationOptions, check_submitter,
};
use nbi_ingest::parse_submission;
use nbi_standards::{CodeListCache, CsvReferenceSource, reference_root};

fn validate(json: &str) -> BatchResult {
    let source = CsvReferenceSource::open(&reference_root()).expect("reference data");
    let cache = CodeListCache::new(source);
    let options = ValidationOptions::default()
        .with_as_of(NaiveDate::from_ymd_opt(2026, 6, 30).expect("date"));
    let validator = BatchValidator::new(&cache, options).expect("validator");
    let submission = parse_submission(json).expect("submission");
    validator
        .validate(submission, &CancellationToken::new(), &NoProgress)
        .expect("batch")
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("json output")
}

#[test]
fn completed_batch_writes_every_file() {
    let result = validate(
        r#"{"submitter_state": "06", "bridges": [
            {"BL01": "06", "BL02": "037", "BID01": "B-1"},
            {"BL01": "06", "BL02": "037", "BID01": "B-1"}
        ]}"#,
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("nested").join("output");

    let written = write_outputs(&result, &out).expect("write");

    assert_eq!(written.len(), 7);
    assert!(written.iter().all(|path| path.exists()));

    let summary = read_json(&out.join(SUMMARY_FILE));
    assert_eq!(summary["outcome"], "Completed");
    assert_eq!(summary["submitted"], 2);
    assert_eq!(summary["evaluated"], 1);
    assert_eq!(summary["duplicates"], 1);

    let duplicates = read_json(&out.join(DUPLICATES_FILE));
    assert_eq!(duplicates["removed"]["Bridge"][0]["bridge_number"], "B-1");

    let sanitized = read_json(&out.join(SANITIZED_FILE));
    assert_eq!(sanitized.as_array().map(Vec::len), Some(1));
}

#[test]
fn rejected_batch_writes_only_the_summary_and_sentinel() {
    let result = validate(
        r#"{"submitter_state": "06", "bridges": [{"BL01": "32", "BID01": "NV-1"}]}"#,
    );
    assert!(result.is_rejected());
    let dir = tempfile::tempdir().expect("tempdir");

    let written = write_outputs(&result, dir.path()).expect("write");

    let names: Vec<_> = written
        .iter()
        .filter_map(|path| path.file_name()?.to_str())
        .collect();
    assert_eq!(names, [SUMMARY_FILE, FAILURES_FILE]);
    assert!(!dir.path().join(SANITIZED_FILE).exists());
}

#[test]
fn summary_counts_follow_the_result() {
    let bridges = parse_submission(r#"{"bridges": [{"BL01": "32", "BID01": "NV-1"}]}"#)
        .expect("submission")
        .bridges;
    let sentinel = check_submitter(Some("06"), &bridges).expect("mismatch");
    let result = BatchResult::rejected(sentinel, bridges.len());

    let summary = BatchSummary::of(&result);
    insta::assert_json_snapshot!(summary, @r#"
    {
      "outcome": "Rejected",
      "submitted": 1,
      "evaluated": 0,
      "border_bridges": 0,
      "failures": {
        "Critical": 1
      },
      "fatal_failures": 1,
      "fatal_keys": {},
      "affected_records": 0,
      "duplicates": 0,
      "temporary_codes": 0
    }
    "#);
}
