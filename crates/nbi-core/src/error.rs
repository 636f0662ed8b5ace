use nbi_standards::StandardsError;
use nbi_validate::ValidateError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("validation cancelled after {processed} of {total} records")]
    Cancelled { processed: usize, total: usize },

    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error("reference data unavailable: {0}")]
    Standards(#[from] StandardsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
