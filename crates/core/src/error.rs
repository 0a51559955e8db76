//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid filter field: {0}")]
    InvalidFilterField(String),

    #[error("invalid filter operator: {0}")]
    InvalidFilterOp(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid session: {0}")]
    InvalidSession(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
