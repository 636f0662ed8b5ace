//! Batch validation pipeline.
//!
//! [`BatchValidator`] runs a submission through the submitter gate,
//! duplicate elimination, rule evaluation with safety cross-checks, fatal
//! key collection and sanitization, producing a [`BatchResult`].
//!
//! The lookup cache is owned by the caller and borrowed for the lifetime of
//! the validator, so several batches can share one populated cache.

pub mod cancel;
pub mod error;
pub mod gate;
pub mod options;
pub mod progress;
pub mod result;
pub mod validator;

pub use cancel::CancellationToken;
pub use error::{PipelineError, Result};
pub use gate::{SUBMITTER_STATE_MISMATCH, check_submitter};
pub use options::ValidationOptions;
pub use progress::{NoProgress, Progress, ProgressSink};
pub use result::{BatchOutcome, BatchResult};
pub use validator::BatchValidator;
