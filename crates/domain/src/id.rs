//! Node identity generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Process-wide sequence shared by every minted id.
static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a node in the collection tree.
///
/// Minted ids look like `folder-42-9f1c03be77a2d410`: a prefix naming the
/// node kind, a monotonically increasing sequence number and 64 random bits.
/// The sequence alone is unique within the process; the random suffix keeps
/// ids from different sessions apart once they are persisted side by side.
///
/// Ids loaded from disk are accepted verbatim as long as they are not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wraps an existing identifier without validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parses an identifier, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] if `value` is empty or
    /// whitespace only.
    pub fn parse(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidIdentifier(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Mints a fresh identifier with the given prefix.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let suffix: u64 = rand::random();
        Self(format!("{prefix}-{sequence}-{suffix:016x}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
