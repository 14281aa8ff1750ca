//! Courier - Main Entry Point
//!
//! Opens the configured workspace, prints its collection tree and writes
//! the tree back when a starter tree had to be seeded.
//!
//! Usage: `courier [FILTER]`

use courier_application::use_cases::{LoadForest, LoadForestInput, SaveForest};
use courier_application::{ApplicationError, ApplicationResult, CollectionEngine, TreeRow};
use courier_domain::NodeKind;
use courier_infrastructure::{
    DefaultRequestDataFactory, EngineConfig, FileSystemForestRepository, TokioFileSystem,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::load().map_err(|e| ApplicationError::Config(e.to_string()))?;
    let filter = std::env::args().nth(1).unwrap_or_default();

    tracing::info!(
        data_dir = %config.data_dir.display(),
        workspace = %config.workspace,
        "Starting Courier v{}",
        env!("CARGO_PKG_VERSION")
    );

    for row in open_workspace(&config).await?.visible_rows(&filter) {
        println!("{}", render_row(&row));
    }

    Ok(())
}

/// Loads the configured workspace, persisting the starter tree when one
/// was seeded.
async fn open_workspace(
    config: &EngineConfig,
) -> ApplicationResult<CollectionEngine<DefaultRequestDataFactory>> {
    let repository = FileSystemForestRepository::new(
        TokioFileSystem::new(),
        DefaultRequestDataFactory::new(),
        &config.data_dir,
        &config.default_url,
    );
    let loaded = LoadForest::new(&repository, DefaultRequestDataFactory::new())
        .execute(LoadForestInput {
            workspace_id: config.workspace.clone(),
            seed_starter_tree: config.seed_starter_tree,
        })
        .await?;
    if loaded.seeded {
        SaveForest::new(&repository)
            .execute(&config.workspace, &loaded.forest)
            .await?;
    }

    Ok(CollectionEngine::new(
        loaded.forest,
        DefaultRequestDataFactory::new(),
        config.tree_settings(),
    ))
}

fn render_row(row: &TreeRow) -> String {
    let indent = "  ".repeat(row.depth as usize);
    match row.kind {
        NodeKind::Folder => {
            let marker = if row.expanded { "v" } else { ">" };
            format!("{indent}{marker} {}", row.name)
        }
        NodeKind::Request => {
            let method = row.method.as_deref().unwrap_or_default();
            format!("{indent}  [{method}] {}", row.name)
        }
    }
}
