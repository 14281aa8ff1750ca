//! Application error types

use thiserror::Error;

use crate::ports::ForestStoreError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The forest could not be loaded or saved.
    #[error("storage error: {0}")]
    Storage(#[from] ForestStoreError),

    /// Configuration could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
