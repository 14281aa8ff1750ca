//! File system based forest repository implementation.

use std::path::{Path, PathBuf};

use courier_application::ports::{
    FileSystem, FileSystemError, ForestRepository, ForestStoreError, RequestDataFactory,
};
use courier_domain::Forest;
use tracing::{debug, warn};

use super::normalize::ForestNormalizer;
use crate::serialization::{parse_json_value, to_json_stable};

const WORKSPACES_DIR: &str = "workspaces";
const FOREST_FILE: &str = "collections.json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Stores each workspace's forest as
/// `{root}/workspaces/{workspace_id}/collections.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write never leaves a truncated tree behind.
pub struct FileSystemForestRepository<F: FileSystem, B: RequestDataFactory> {
    fs: F,
    factory: B,
    root: PathBuf,
    default_url: String,
}

impl<F: FileSystem, B: RequestDataFactory> FileSystemForestRepository<F, B> {
    /// Creates a repository rooted at `root`. `factory` and `default_url`
    /// rebuild request payloads that cannot be decoded.
    #[must_use]
    pub fn new(
        fs: F,
        factory: B,
        root: impl Into<PathBuf>,
        default_url: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            factory,
            root: root.into(),
            default_url: default_url.into(),
        }
    }

    /// Returns the file a workspace's forest is stored in.
    ///
    /// # Errors
    ///
    /// Returns [`ForestStoreError::InvalidWorkspace`] if the id is blank or
    /// could escape the workspaces directory.
    pub fn forest_path(&self, workspace: &str) -> Result<PathBuf, ForestStoreError> {
        validate_workspace_id(workspace)?;
        Ok(self
            .root
            .join(WORKSPACES_DIR)
            .join(workspace)
            .join(FOREST_FILE))
    }
}

fn validate_workspace_id(workspace: &str) -> Result<(), ForestStoreError> {
    let valid = !workspace.is_empty()
        && workspace != "."
        && workspace != ".."
        && workspace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ForestStoreError::InvalidWorkspace(workspace.to_string()))
    }
}

impl<F, B> ForestRepository for FileSystemForestRepository<F, B>
where
    F: FileSystem + Send + Sync,
    B: RequestDataFactory + Send + Sync,
{
    async fn load(&self, workspace: &str) -> Result<Option<Forest>, ForestStoreError> {
        let path = self.forest_path(workspace)?;

        let content = match self.fs.read_file_string(&path).await {
            Ok(content) => content,
            Err(FileSystemError::NotFound(_)) => {
                debug!(path = %path.display(), "no stored collection tree");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let document = match parse_json_value(&content) {
            Ok(document) => document,
            Err(err) => {
                warn!(path = %path.display(), %err, "stored collection tree is corrupt");
                return Ok(None);
            }
        };

        let mut normalizer = ForestNormalizer::new(&self.factory, &self.default_url);
        let forest = normalizer.normalize(&document);
        if normalizer.repaired() > 0 {
            warn!(
                path = %path.display(),
                repaired = normalizer.repaired(),
                "repaired stored collection tree"
            );
        }
        Ok(Some(forest))
    }

    async fn save(&self, workspace: &str, forest: &Forest) -> Result<(), ForestStoreError> {
        let path = self.forest_path(workspace)?;
        let json =
            to_json_stable(forest).map_err(|e| ForestStoreError::Serialization(e.to_string()))?;

        if let Some(dir) = path.parent() {
            self.fs.create_dir_all(dir).await?;
        }
        let temp = temp_path(&path);
        self.fs.write_file(&temp, json.as_bytes()).await?;
        self.fs.rename(&temp, &path).await?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(TEMP_EXTENSION)
}

#[cfg(test)]
mod tests {
    use courier_domain::{Folder, NodeId, RequestData, RequestNode, RequestType};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::adapters::DefaultRequestDataFactory;
    use crate::persistence::TokioFileSystem;

    type Repository = FileSystemForestRepository<TokioFileSystem, DefaultRequestDataFactory>;

    fn repository(dir: &TempDir) -> Repository {
        FileSystemForestRepository::new(
            TokioFileSystem::new(),
            DefaultRequestDataFactory::new(),
            dir.path(),
            "https://example.com",
        )
    }

    fn forest() -> Forest {
        Forest::from(vec![
            Folder::with_id("f", "Folder")
                .with_children(vec![
                    RequestNode::with_id(
                        "r",
                        "Req",
                        RequestData::new("GRPC", "grpc://localhost:50051")
                            .with_request_type(RequestType::Grpc),
                    )
                    .into(),
                ])
                .into(),
        ])
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().expect("temp dir");
        let repository = repository(&dir);

        repository.save("default", &forest()).await.expect("save");
        let loaded = repository.load("default").await.expect("load");
        assert_eq!(loaded, Some(forest()));

        let path = dir.path().join("workspaces/default/collections.json");
        let text = tokio::fs::read_to_string(&path).await.expect("file exists");
        assert!(text.ends_with('\n'));
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = TempDir::new().expect("temp dir");
        let loaded = repository(&dir).load("nothing-here").await.expect("load");
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_none() {
        let dir = TempDir::new().expect("temp dir");
        let repository = repository(&dir);
        let path = repository.forest_path("broken").expect("valid id");
        tokio::fs::create_dir_all(path.parent().expect("has parent"))
            .await
            .expect("mkdir");
        tokio::fs::write(&path, "[{\"type\": \"folder\",").await.expect("write");

        assert_eq!(repository.load("broken").await.expect("load"), None);
    }

    #[tokio::test]
    async fn test_legacy_entries_are_repaired() {
        let dir = TempDir::new().expect("temp dir");
        let repository = repository(&dir);
        let path = repository.forest_path("legacy").expect("valid id");
        tokio::fs::create_dir_all(path.parent().expect("has parent"))
            .await
            .expect("mkdir");
        tokio::fs::write(
            &path,
            r#"[{"type": "request", "id": "old", "name": "Old", "method": "PUT", "url": "/x"}, 7]"#,
        )
        .await
        .expect("write");

        let loaded = repository
            .load("legacy")
            .await
            .expect("load")
            .expect("some forest");
        assert_eq!(loaded.nodes().len(), 1);
        let Some(courier_domain::CollectionNode::Request(old)) = loaded.node(&NodeId::new("old"))
        else {
            unreachable!("old is a request");
        };
        assert_eq!(old.request.method, "PUT");
        assert_eq!(old.request.headers.len(), 2);
    }

    #[tokio::test]
    async fn test_workspace_id_cannot_escape() {
        let dir = TempDir::new().expect("temp dir");
        let repository = repository(&dir);
        for workspace in ["", "..", "../etc", "a/b"] {
            assert!(matches!(
                repository.save(workspace, &forest()).await,
                Err(ForestStoreError::InvalidWorkspace(_))
            ));
        }
    }
}
