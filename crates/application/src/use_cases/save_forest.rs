//! Save forest use case.

use courier_domain::Forest;
use tracing::info;

use crate::ports::{ForestRepository, ForestStoreError};

/// Use case for persisting the collection tree of a workspace.
pub struct SaveForest<R: ForestRepository> {
    repository: R,
}

impl<R: ForestRepository> SaveForest<R> {
    /// Creates a new `SaveForest` use case.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Replaces the stored forest of `workspace_id`.
    ///
    /// # Errors
    /// Returns an error if the workspace id is unusable or the write fails.
    pub async fn execute(
        &self,
        workspace_id: &str,
        forest: &Forest,
    ) -> Result<(), ForestStoreError> {
        self.repository.save(workspace_id, forest).await?;
        info!(
            workspace = %workspace_id,
            nodes = forest.node_count(),
            "saved collection tree"
        );
        Ok(())
    }
}
