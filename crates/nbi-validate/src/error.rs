use std::path::PathBuf;

use nbi_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("failed to read rule bundle file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule bundle CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing column {column} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("workflow {workflow} references unknown rule {rule}")]
    UnknownRule { workflow: String, rule: String },

    #[error("rule {rule} belongs to {actual} but workflow {workflow} validates {expected}")]
    DatasetMismatch {
        workflow: String,
        rule: String,
        expected: String,
        actual: String,
    },

    #[error("workflow {workflow} mixes datasets {first} and {second}")]
    MixedDatasets {
        workflow: String,
        first: String,
        second: String,
    },

    #[error("invalid {column} value {value:?} for rule {rule} in workflow {workflow}")]
    InvalidOverride {
        workflow: String,
        rule: String,
        column: String,
        value: String,
    },

    #[error("no workflow named {name}")]
    MissingWorkflow { name: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
