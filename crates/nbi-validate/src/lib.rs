//! Rule evaluation for bridge inventory submissions.
//!
//! - [`rules`]: the rule registry, generated format/lookup rules and the
//!   hand-written presence, cross-field and cross-dataset rules.
//! - [`workflow`]: default and CSV-loaded rule bundles.
//! - [`engine`]: evaluates a bundle against a record and its children.
//! - [`border`]: border-bridge classification.
//! - [`safety`]: posting-status cross-checks.
//! - [`fatal`]: fatal key collection and propagation.

pub mod border;
pub mod context;
pub mod engine;
pub mod error;
pub mod fatal;
pub mod input;
pub mod rules;
pub mod safety;
pub mod workflow;

pub use border::{BORDER_PERMITTED, is_border_bridge};
pub use context::{CodeTally, RuleContext};
pub use engine::{BridgeEvaluation, RuleEngine};
pub use error::{Result, ValidateError};
pub use fatal::{affected_records, collect_fatal_keys, fatal_counts};
pub use input::RuleInput;
pub use rules::{Check, Rule, RuleRegistry, Scope};
pub use safety::{cross_check, latest_posting_status};
pub use workflow::{BundledRule, Workflow, WorkflowSet, WorkflowSummary, load_workflows};
