use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Color, Table};
use tracing::{debug, info, info_span};

use nbi_cli::logging::redact_value;
use nbi_cli::output::write_outputs;
use nbi_core::{BatchResult, BatchValidator, CancellationToken, ValidationOptions};
use nbi_ingest::read_submission;
use nbi_model::EntityKind;
use nbi_standards::{CodeListCache, reference_root, verify_and_load};
use nbi_validate::{RuleRegistry, WorkflowSet, load_workflows};

use crate::cli::{RulesArgs, ValidateArgs};
use crate::progress::BarProgress;
use crate::summary::{
    align_column, apply_table_style, count_cell, dataset_cell, dim_cell, header_cell,
    severity_cell,
};

/// Outcome of the validate command.
pub struct ValidateRun {
    pub result: BatchResult,
    pub written: Vec<PathBuf>,
}

pub fn run_validate(args: &ValidateArgs, reference_dir: Option<&Path>) -> Result<ValidateRun> {
    let run_span = info_span!("validate", submission = %args.submission.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    // =========================================================================
    // Stage 0: Reference data and options
    // =========================================================================
    let reference_dir = resolve_reference_dir(reference_dir);
    let (source, _) = verify_and_load(&reference_dir)
        .with_context(|| format!("load reference data from {}", reference_dir.display()))?;
    let cache = CodeListCache::new(source);

    let mut options = ValidationOptions::default();
    if let Some(state) = &args.submitter_state {
        options = options.with_submitter_state(state.as_str());
    }
    if let Some(as_of) = args.as_of {
        options = options.with_as_of(as_of);
    }
    if let Some(path) = &args.bundles {
        options = options.with_bundle_path(path);
    }
    let validator = BatchValidator::new(&cache, options).context("prepare validator")?;

    // =========================================================================
    // Stage 1: Ingest and validate
    // =========================================================================
    let submission = read_submission(&args.submission).context("read submission")?;
    let progress = BarProgress::new(!args.no_progress && io::stderr().is_terminal());
    let validated = validator.validate(submission, &CancellationToken::new(), &progress);
    progress.finish();
    let result = validated.context("validate submission")?;

    for failure in result.failures.iter().filter(|failure| failure.fatal) {
        debug!(
            rule = %failure.rule,
            bridge = %failure.origin.bridge,
            key = %failure.origin.key,
            value = redact_value(failure.origin.value.as_deref().unwrap_or_default()),
            "fatal failure"
        );
    }

    // =========================================================================
    // Stage 2: Output
    // =========================================================================
    let written = if args.dry_run {
        Vec::new()
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.submission));
        write_outputs(&result, &output_dir)?
    };

    info!(
        failures = result.failures.len(),
        fatal_keys = result.fatal_keys.len(),
        files = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "validate command complete"
    );
    Ok(ValidateRun { result, written })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let dataset = args
        .dataset
        .as_deref()
        .map(str::parse::<EntityKind>)
        .transpose()?;
    let registry = RuleRegistry::with_default_rules();

    if args.workflows {
        let mut workflows = WorkflowSet::defaults(&registry);
        if let Some(path) = &args.bundles {
            workflows.merge(load_workflows(path, &registry).context("load rule bundles")?);
        }
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Workflow"),
            header_cell("Dataset"),
            header_cell("Rules"),
            header_cell("Fatal"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for summary in workflows.summaries() {
            if dataset.is_some_and(|kind| kind.dataset_name() != summary.dataset) {
                continue;
            }
            table.add_row(vec![
                Cell::new(&summary.name),
                Cell::new(&summary.dataset),
                Cell::new(summary.rules),
                count_cell(Some(summary.fatal), Color::Red),
            ]);
        }
        println!("{table}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Dataset"),
        header_cell("Item"),
        header_cell("Check"),
        header_cell("Severity"),
        header_cell("Fatal"),
        header_cell("Scope"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    let mut rules: Vec<_> = registry
        .iter()
        .filter(|rule| dataset.is_none_or(|kind| rule.kind == kind))
        .collect();
    rules.sort_by(|a, b| a.kind.cmp(&b.kind).then(a.name.cmp(&b.name)));
    for rule in rules {
        table.add_row(vec![
            Cell::new(&rule.name),
            dataset_cell(rule.kind),
            Cell::new(rule.item),
            dim_cell(rule.check.label()),
            severity_cell(rule.severity),
            if rule.fatal {
                Cell::new("yes").fg(Color::Red)
            } else {
                dim_cell("-")
            },
            Cell::new(format!("{:?}", rule.scope)),
            Cell::new(&rule.description),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_reference(reference_dir: Option<&Path>) -> Result<()> {
    let reference_dir = resolve_reference_dir(reference_dir);
    let (_, summary) = verify_and_load(&reference_dir)
        .with_context(|| format!("verify reference data in {}", reference_dir.display()))?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Reference"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Directory", summary.reference_dir.display().to_string()),
        ("Edition", summary.pins.edition.clone()),
        ("Exported", summary.pins.exported.clone()),
        ("Files", summary.file_count.to_string()),
        ("Code lists", summary.code_list_count.to_string()),
        ("Codes", summary.code_count.to_string()),
        ("States", summary.state_count.to_string()),
        ("Counties", summary.county_count.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{table}");
    Ok(())
}

fn resolve_reference_dir(reference_dir: Option<&Path>) -> PathBuf {
    reference_dir.map_or_else(reference_root, Path::to_path_buf)
}

fn default_output_dir(submission: &Path) -> PathBuf {
    submission
        .parent()
        .map_or_else(|| PathBuf::from("output"), |dir| dir.join("output"))
}
