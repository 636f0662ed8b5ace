//! Rule bundles ("workflows").
//!
//! A workflow is an ordered list of registry rules for one dataset, each
//! with the severity and fatal flag that bundle assigns it. Default
//! workflows are derived from rule scopes; a CSV bundle file can replace
//! any of them by name.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use nbi_model::{EntityKind, Severity};

use crate::error::{Result, ValidateError};
use crate::rules::{Rule, RuleRegistry};

/// A registry rule with the metadata one workflow gives it.
#[derive(Debug, Clone)]
pub struct BundledRule {
    pub rule: Arc<Rule>,
    pub severity: Severity,
    pub fatal: bool,
}

impl BundledRule {
    /// The rule with its default metadata.
    pub fn new(rule: Arc<Rule>) -> Self {
        Self {
            severity: rule.severity,
            fatal: rule.fatal,
            rule,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Workflow {
    pub name: String,
    pub kind: EntityKind,
    pub rules: Vec<BundledRule>,
}

impl Workflow {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One row of `rules --workflows` output.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSummary {
    pub name: String,
    pub dataset: String,
    pub rules: usize,
    pub fatal: usize,
}

/// Workflows by name.
#[derive(Debug, Clone, Default)]
pub struct WorkflowSet {
    workflows: BTreeMap<String, Workflow>,
}

impl WorkflowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// An ordinary and a border workflow for every dataset, holding the
    /// registry rules whose scope includes it.
    pub fn defaults(registry: &RuleRegistry) -> Self {
        let mut set = Self::new();
        for &kind in EntityKind::all() {
            for border in [false, true] {
                let rules = registry
                    .rules_for(kind)
                    .filter(|rule| rule.scope.includes(border))
                    .map(|rule| BundledRule::new(Arc::clone(rule)))
                    .collect();
                set.insert(Workflow {
                    name: kind.workflow_name(border),
                    kind,
                    rules,
                });
            }
        }
        set
    }

    /// Insert a workflow, replacing any with the same name.
    pub fn insert(&mut self, workflow: Workflow) -> Option<Workflow> {
        self.workflows.insert(workflow.name.clone(), workflow)
    }

    /// Take every workflow of `other`, replacing same-named ones.
    pub fn merge(&mut self, other: Self) {
        for (name, workflow) in other.workflows {
            debug!(workflow = %name, rules = workflow.len(), "workflow replaced");
            self.workflows.insert(name, workflow);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Workflow> {
        self.workflows.get(name)
    }

    /// The workflow a record (or one of its children) is evaluated with.
    pub fn select(&self, kind: EntityKind, border: bool) -> Option<&Workflow> {
        self.get(&kind.workflow_name(border))
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workflow> {
        self.workflows.values()
    }

    pub fn summaries(&self) -> Vec<WorkflowSummary> {
        self.iter()
            .map(|workflow| WorkflowSummary {
                name: workflow.name.clone(),
                dataset: workflow.kind.dataset_name().to_string(),
                rules: workflow.len(),
                fatal: workflow.rules.iter().filter(|rule| rule.fatal).count(),
            })
            .collect()
    }
}

/// Load workflows from a bundle CSV.
///
/// Columns: `Workflow`, `Dataset`, `Rule`, and optionally `Severity` and
/// `Fatal`. Rows keep file order within a workflow. Blank override cells
/// keep the rule's default metadata.
pub fn load_workflows(path: &Path, registry: &RuleRegistry) -> Result<WorkflowSet> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;
    let headers = reader.headers().map_err(|e| csv_error(path, &e))?.clone();

    let workflow_idx = find_column(path, &headers, "Workflow")?;
    let dataset_idx = find_column(path, &headers, "Dataset")?;
    let rule_idx = find_column(path, &headers, "Rule")?;
    let severity_idx = optional_column(&headers, "Severity");
    let fatal_idx = optional_column(&headers, "Fatal");

    let mut set = WorkflowSet::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, &e))?;
        let name = cell(&record, Some(workflow_idx));
        let rule_name = cell(&record, Some(rule_idx));
        if name.is_empty() || rule_name.is_empty() {
            continue;
        }
        let kind: EntityKind = cell(&record, Some(dataset_idx)).parse()?;

        let rule = registry
            .get(rule_name)
            .ok_or_else(|| ValidateError::UnknownRule {
                workflow: name.to_string(),
                rule: rule_name.to_string(),
            })?;
        if rule.kind != kind {
            return Err(ValidateError::DatasetMismatch {
                workflow: name.to_string(),
                rule: rule_name.to_string(),
                expected: kind.dataset_name().to_string(),
                actual: rule.kind.dataset_name().to_string(),
            });
        }

        let mut bundled = BundledRule::new(Arc::clone(rule));
        let severity = cell(&record, severity_idx);
        if !severity.is_empty() {
            bundled.severity = Severity::parse(severity)
                .ok_or_else(|| invalid_override(name, rule_name, "Severity", severity))?;
        }
        let fatal = cell(&record, fatal_idx);
        if !fatal.is_empty() {
            bundled.fatal = parse_flag(fatal)
                .ok_or_else(|| invalid_override(name, rule_name, "Fatal", fatal))?;
        }

        let workflow = set
            .workflows
            .entry(name.to_string())
            .or_insert_with(|| Workflow {
                name: name.to_string(),
                kind,
                rules: Vec::new(),
            });
        if workflow.kind != kind {
            return Err(ValidateError::MixedDatasets {
                workflow: name.to_string(),
                first: workflow.kind.dataset_name().to_string(),
                second: kind.dataset_name().to_string(),
            });
        }
        workflow.rules.push(bundled);
    }

    info!(
        path = %path.display(),
        workflows = set.len(),
        "rule bundles loaded"
    );
    Ok(set)
}

fn csv_error(path: &Path, error: &csv::Error) -> ValidateError {
    match error.kind() {
        csv::ErrorKind::Io(e) => ValidateError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(e.kind(), e.to_string()),
        },
        _ => ValidateError::Csv {
            path: path.to_path_buf(),
            message: error.to_string(),
        },
    }
}

fn find_column(path: &Path, headers: &StringRecord, name: &str) -> Result<usize> {
    optional_column(headers, name).ok_or_else(|| ValidateError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn optional_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}').eq_ignore_ascii_case(name))
}

fn cell(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn invalid_override(workflow: &str, rule: &str, column: &str, value: &str) -> ValidateError {
    ValidateError::InvalidOverride {
        workflow: workflow.to_string(),
        rule: rule.to_string(),
        column: column.to_string(),
        value: value.to_string(),
    }
}
