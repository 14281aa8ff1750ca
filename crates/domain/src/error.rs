//! Domain error types

use thiserror::Error;

use crate::id::NodeId;

/// Domain-level errors raised when a caller breaks a tree operation contract.
///
/// User-driven mistakes (blank names, illegal moves) never surface here; those
/// operations degrade to no-ops instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The parent id passed to an insertion does not exist in the forest.
    #[error("unknown parent folder: {0}")]
    UnknownParent(NodeId),

    /// The parent id passed to an insertion names a request, not a folder.
    #[error("node is not a folder: {0}")]
    NotAFolder(NodeId),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
