use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImproveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
