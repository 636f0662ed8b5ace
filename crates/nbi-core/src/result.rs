use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use nbi_model::{BridgeRecord, FailedRule, FatalKeys, RecordId, Severity};
use nbi_transform::{DuplicateReport, SanitizeSummary};
use nbi_validate::CodeTally;

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchOutcome {
    /// Every record was evaluated and sanitized.
    Completed,
    /// The submitter gate refused the batch; nothing was evaluated.
    Rejected,
}

/// Everything a batch produces for reporting and staging collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub outcome: BatchOutcome,
    /// Records in the submission, before deduplication.
    pub submitted: usize,
    /// Records that went through the rule engine.
    pub evaluated: usize,
    pub border_bridges: usize,
    /// Failed rules in evaluation order, safety cross-checks after each
    /// record's own rules.
    pub failures: Vec<FailedRule>,
    /// Sanitized twins in record order. Empty for a rejected batch.
    pub sanitized: Vec<BridgeRecord>,
    pub duplicates: DuplicateReport,
    pub fatal_keys: FatalKeys,
    /// Records carrying at least one removed entity.
    pub affected_records: BTreeSet<RecordId>,
    /// Temporary codes accepted by lookup rules.
    pub code_tally: CodeTally,
    pub sanitize_summary: SanitizeSummary,
}

impl BatchResult {
    /// A batch refused at the gate, carrying only the sentinel failure.
    pub fn rejected(sentinel: FailedRule, submitted: usize) -> Self {
        Self {
            outcome: BatchOutcome::Rejected,
            submitted,
            evaluated: 0,
            border_bridges: 0,
            failures: vec![sentinel],
            sanitized: Vec::new(),
            duplicates: DuplicateReport::new(),
            fatal_keys: FatalKeys::new(),
            affected_records: BTreeSet::new(),
            code_tally: CodeTally::new(),
            sanitize_summary: SanitizeSummary::new(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome == BatchOutcome::Rejected
    }

    /// Failure counts per severity, in severity order.
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.severity).or_insert(0) += 1;
        }
        counts
    }

    pub fn fatal_failures(&self) -> usize {
        self.failures.iter().filter(|failure| failure.fatal).count()
    }

    /// Whether anything will be excluded from staging.
    pub fn has_fatal(&self) -> bool {
        !self.fatal_keys.is_empty()
    }
}
