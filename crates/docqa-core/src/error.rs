use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("embedding failed for input {position}: {reason}")]
    EmbeddingFailure { position: usize, reason: String },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("empty corpus: no content to search")]
    EmptyCorpus,
}

pub type Result<T> = std::result::Result<T, Error>;
