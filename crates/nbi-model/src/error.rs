use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown dataset: {name}")]
    UnknownDataset { name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
