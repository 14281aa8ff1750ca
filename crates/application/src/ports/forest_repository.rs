//! Forest persistence port.

use courier_domain::Forest;

use super::FileSystemError;

/// Error type for forest persistence.
#[derive(Debug, thiserror::Error)]
pub enum ForestStoreError {
    /// The workspace id cannot be used as a storage key.
    #[error("Invalid workspace id: {0:?}")]
    InvalidWorkspace(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),
}

/// Loads and saves the forest of a workspace.
pub trait ForestRepository: Send + Sync {
    /// Loads the stored forest of `workspace`.
    ///
    /// Returns `Ok(None)` when nothing usable is stored yet, so the caller
    /// can seed a starter tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read at all.
    fn load(
        &self,
        workspace: &str,
    ) -> impl std::future::Future<Output = Result<Option<Forest>, ForestStoreError>> + Send;

    /// Replaces the stored forest of `workspace`.
    ///
    /// # Errors
    ///
    /// Returns an error if the forest cannot be serialized or written.
    fn save(
        &self,
        workspace: &str,
        forest: &Forest,
    ) -> impl std::future::Future<Output = Result<(), ForestStoreError>> + Send;
}

impl<R: ForestRepository> ForestRepository for &R {
    fn load(
        &self,
        workspace: &str,
    ) -> impl std::future::Future<Output = Result<Option<Forest>, ForestStoreError>> + Send {
        (**self).load(workspace)
    }

    fn save(
        &self,
        workspace: &str,
        forest: &Forest,
    ) -> impl std::future::Future<Output = Result<(), ForestStoreError>> + Send {
        (**self).save(workspace, forest)
    }
}
