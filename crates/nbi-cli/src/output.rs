//! Result files written after a batch.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use nbi_core::{BatchOutcome, BatchResult};
use nbi_model::{EntityKind, Severity};

pub const SUMMARY_FILE: &str = "summary.json";
pub const FAILURES_FILE: &str = "failures.json";
pub const SANITIZED_FILE: &str = "sanitized.json";
pub const DUPLICATES_FILE: &str = "duplicates.json";
pub const FATAL_KEYS_FILE: &str = "fatal_keys.json";
pub const CODE_TALLY_FILE: &str = "code_tally.json";
pub const SANITIZE_SUMMARY_FILE: &str = "sanitize_summary.json";

/// Headline counts of one batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub outcome: BatchOutcome,
    pub submitted: usize,
    pub evaluated: usize,
    pub border_bridges: usize,
    pub failures: BTreeMap<Severity, usize>,
    pub fatal_failures: usize,
    pub fatal_keys: BTreeMap<EntityKind, usize>,
    pub affected_records: usize,
    pub duplicates: usize,
    pub temporary_codes: usize,
}

impl BatchSummary {
    pub fn of(result: &BatchResult) -> Self {
        Self {
            outcome: result.outcome,
            submitted: result.submitted,
            evaluated: result.evaluated,
            border_bridges: result.border_bridges,
            failures: result.severity_counts(),
            fatal_failures: result.fatal_failures(),
            fatal_keys: EntityKind::all()
                .iter()
                .map(|&kind| (kind, result.fatal_keys.count(kind)))
                .filter(|(_, count)| *count > 0)
                .collect(),
            affected_records: result.affected_records.len(),
            duplicates: result.duplicates.total(),
            temporary_codes: result.code_tally.total(),
        }
    }
}

/// Write the batch results as JSON files under `dir`.
///
/// A rejected batch only gets the summary and its sentinel failure.
pub fn write_outputs(result: &BatchResult, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {}", dir.display()))?;

    let mut written = vec![
        write_json(dir, SUMMARY_FILE, &BatchSummary::of(result))?,
        write_json(dir, FAILURES_FILE, &result.failures)?,
    ];
    if !result.is_rejected() {
        written.push(write_json(dir, SANITIZED_FILE, &result.sanitized)?);
        written.push(write_json(dir, DUPLICATES_FILE, &result.duplicates)?);
        written.push(write_json(dir, FATAL_KEYS_FILE, &result.fatal_keys)?);
        written.push(write_json(dir, CODE_TALLY_FILE, &result.code_tally)?);
        written.push(write_json(
            dir,
            SANITIZE_SUMMARY_FILE,
            &result.sanitize_summary,
        )?);
    }
    info!(dir = %dir.display(), files = written.len(), "results written");
    Ok(written)
}

fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("serialize {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
