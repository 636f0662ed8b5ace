//! The batch pipeline.

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use nbi_ingest::Submission;
use nbi_model::BridgeRecord;
use nbi_standards::CodeListCache;
use nbi_transform::{SanitizeSummary, dedupe_records, sanitize_record};
use nbi_validate::{
    CodeTally, RuleContext, RuleEngine, RuleRegistry, WorkflowSet, affected_records,
    collect_fatal_keys, cross_check, load_workflows,
};

use crate::cancel::CancellationToken;
use crate::error::{PipelineError, Result};
use crate::gate::check_submitter;
use crate::options::ValidationOptions;
use crate::progress::{Progress, ProgressSink};
use crate::result::{BatchOutcome, BatchResult};

/// Validates batches against one registry and workflow set.
#[derive(Debug)]
pub struct BatchValidator<'a> {
    cache: &'a CodeListCache,
    registry: RuleRegistry,
    engine: RuleEngine,
    options: ValidationOptions,
}

impl<'a> BatchValidator<'a> {
    /// Build the validator and populate every code list its rules use.
    ///
    /// Fails when the bundle file is invalid or a referenced list is
    /// missing or empty, before any record is looked at.
    pub fn new(cache: &'a CodeListCache, options: ValidationOptions) -> Result<Self> {
        let registry = RuleRegistry::with_default_rules();
        let mut workflows = WorkflowSet::defaults(&registry);
        if let Some(path) = &options.bundle_path {
            workflows.merge(load_workflows(path, &registry)?);
        }

        let lists = registry.lookup_lists();
        cache.preload(lists.iter().copied())?;
        info!(
            rules = registry.len(),
            workflows = workflows.len(),
            code_lists = lists.len(),
            "validator ready"
        );

        Ok(Self {
            cache,
            registry,
            engine: RuleEngine::new(workflows),
            options,
        })
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn workflows(&self) -> &WorkflowSet {
        self.engine.workflows()
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Run a submission through the whole pipeline.
    ///
    /// A submitter-state mismatch is not an error: it yields a
    /// [`BatchOutcome::Rejected`] result carrying the sentinel failure.
    pub fn validate(
        &self,
        submission: Submission,
        cancel: &CancellationToken,
        progress: &dyn ProgressSink,
    ) -> Result<BatchResult> {
        let submitted = submission.len();
        let batch_span = info_span!("batch", record_count = submitted);
        let _batch_guard = batch_span.enter();
        let batch_start = Instant::now();

        // =====================================================================
        // Stage 0: Submitter gate
        // =====================================================================
        let submitter = self
            .options
            .submitter_state
            .as_deref()
            .or(submission.submitter_state.as_deref());
        if let Some(sentinel) = check_submitter(submitter, &submission.bridges) {
            warn!(
                record = %sentinel.origin.record,
                description = %sentinel.description,
                "batch rejected"
            );
            return Ok(BatchResult::rejected(sentinel, submitted));
        }

        // =====================================================================
        // Stage 1: Duplicate elimination
        // =====================================================================
        let (records, duplicates) =
            info_span!("dedupe").in_scope(|| dedupe_records(submission.bridges));

        // =====================================================================
        // Stage 2: Rule evaluation and safety cross-checks
        // =====================================================================
        let evaluate_start = Instant::now();
        let ctx = RuleContext::new(self.cache, self.options.as_of);
        let mut code_tally = CodeTally::new();
        let mut failures = Vec::new();
        let mut border_bridges = 0;
        info_span!("evaluate", record_count = records.len()).in_scope(|| -> Result<()> {
            let total = records.len();
            for (index, record) in records.iter().enumerate() {
                if cancel.is_cancelled() {
                    warn!(processed = index, total, "validation cancelled");
                    return Err(PipelineError::Cancelled {
                        processed: index,
                        total,
                    });
                }
                let evaluation = self.engine.evaluate_bridge(record, &ctx, &mut code_tally)?;
                if evaluation.border {
                    border_bridges += 1;
                }
                failures.extend(evaluation.failures);
                failures.extend(cross_check(record));
                progress.report(Progress::new(index + 1, total));
            }
            Ok(())
        })?;
        info!(
            record_count = records.len(),
            failures = failures.len(),
            border_bridges,
            temporary_codes = code_tally.total(),
            duration_ms = evaluate_start.elapsed().as_millis(),
            "evaluation complete"
        );

        // =====================================================================
        // Stage 3: Fatal keys
        // =====================================================================
        let fatal_keys =
            info_span!("fatal_keys").in_scope(|| collect_fatal_keys(&records, &failures));
        let affected = affected_records(&records, &fatal_keys);

        // =====================================================================
        // Stage 4: Sanitization
        // =====================================================================
        let mut sanitize_summary = SanitizeSummary::new();
        let sanitized: Vec<BridgeRecord> = info_span!("sanitize").in_scope(|| {
            records
                .iter()
                .map(|record| sanitize_record(record, &fatal_keys, &mut sanitize_summary))
                .collect()
        });
        debug!(changed = sanitize_summary.total().changed(), "sanitization complete");

        info!(
            submitted,
            evaluated = records.len(),
            duplicates = duplicates.total(),
            failures = failures.len(),
            fatal_keys = fatal_keys.len(),
            affected_records = affected.len(),
            duration_ms = batch_start.elapsed().as_millis(),
            "batch complete"
        );

        Ok(BatchResult {
            outcome: BatchOutcome::Completed,
            submitted,
            evaluated: records.len(),
            border_bridges,
            failures,
            sanitized,
            duplicates,
            fatal_keys,
            affected_records: affected,
            code_tally,
            sanitize_summary,
        })
    }
}
