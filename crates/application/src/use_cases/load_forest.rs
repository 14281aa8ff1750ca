//! Load forest use case.

use courier_domain::Forest;
use tracing::info;

use crate::ports::{ForestRepository, ForestStoreError, RequestDataFactory};
use crate::starter::starter_forest;

/// Input for loading a workspace's forest.
#[derive(Debug, Clone)]
pub struct LoadForestInput {
    /// Workspace whose tree should be loaded.
    pub workspace_id: String,
    /// Whether an empty or missing tree is replaced by the starter tree.
    pub seed_starter_tree: bool,
}

/// Output from loading a forest.
#[derive(Debug, Clone)]
pub struct LoadForestOutput {
    /// The forest to open the session with.
    pub forest: Forest,
    /// Whether the starter tree was seeded instead of stored data.
    pub seeded: bool,
}

/// Use case for loading the collection tree of a workspace.
pub struct LoadForest<R: ForestRepository, F: RequestDataFactory> {
    repository: R,
    factory: F,
}

impl<R: ForestRepository, F: RequestDataFactory> LoadForest<R, F> {
    /// Creates a new `LoadForest` use case.
    #[must_use]
    pub const fn new(repository: R, factory: F) -> Self {
        Self {
            repository,
            factory,
        }
    }

    /// Loads the stored forest, falling back to the starter tree (or an
    /// empty forest) when nothing usable is stored.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read at all.
    pub async fn execute(
        &self,
        input: LoadForestInput,
    ) -> Result<LoadForestOutput, ForestStoreError> {
        let stored = self.repository.load(&input.workspace_id).await?;

        match stored {
            Some(forest) if !forest.is_empty() => {
                info!(
                    workspace = %input.workspace_id,
                    nodes = forest.node_count(),
                    "loaded collection tree"
                );
                Ok(LoadForestOutput {
                    forest,
                    seeded: false,
                })
            }
            _ if input.seed_starter_tree => {
                info!(workspace = %input.workspace_id, "seeding starter tree");
                Ok(LoadForestOutput {
                    forest: starter_forest(&self.factory),
                    seeded: true,
                })
            }
            _ => Ok(LoadForestOutput {
                forest: Forest::new(),
                seeded: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use courier_domain::{Folder, RequestData, RequestType};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct MemoryRepository {
        forests: Mutex<HashMap<String, Forest>>,
    }

    impl ForestRepository for MemoryRepository {
        async fn load(&self, workspace: &str) -> Result<Option<Forest>, ForestStoreError> {
            Ok(self
                .forests
                .lock()
                .map_err(|e| ForestStoreError::Serialization(e.to_string()))?
                .get(workspace)
                .cloned())
        }

        async fn save(&self, workspace: &str, forest: &Forest) -> Result<(), ForestStoreError> {
            self.forests
                .lock()
                .map_err(|e| ForestStoreError::Serialization(e.to_string()))?
                .insert(workspace.to_string(), forest.clone());
            Ok(())
        }
    }

    fn factory(method: &str, url: &str, request_type: RequestType) -> RequestData {
        RequestData::new(method, url).with_request_type(request_type)
    }

    fn input(seed_starter_tree: bool) -> LoadForestInput {
        LoadForestInput {
            workspace_id: "default".to_string(),
            seed_starter_tree,
        }
    }

    #[tokio::test]
    async fn test_missing_tree_seeds_starter() {
        let use_case = LoadForest::new(MemoryRepository::default(), factory);
        let output = use_case.execute(input(true)).await.unwrap();
        assert!(output.seeded);
        assert_eq!(output.forest.nodes()[0].name(), "Starter");
    }

    #[tokio::test]
    async fn test_missing_tree_without_seeding_is_empty() {
        let use_case = LoadForest::new(MemoryRepository::default(), factory);
        let output = use_case.execute(input(false)).await.unwrap();
        assert!(!output.seeded);
        assert!(output.forest.is_empty());
    }

    #[tokio::test]
    async fn test_stored_tree_is_returned() {
        let repository = MemoryRepository::default();
        let stored = Forest::from(vec![Folder::with_id("f", "Mine").into()]);
        repository.save("default", &stored).await.unwrap();

        let output = LoadForest::new(repository, factory)
            .execute(input(true))
            .await
            .unwrap();
        assert!(!output.seeded);
        assert_eq!(output.forest, stored);
    }
}
