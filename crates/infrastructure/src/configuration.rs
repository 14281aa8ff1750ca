//! Engine configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. `courier.toml` / `courier.json` in the configuration directory
//! 3. `COURIER_*` environment variables (`COURIER_COPY_SUFFIX`, ...)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use courier_application::TreeSettings;
use courier_domain::collection::{DEFAULT_COPY_SUFFIX, DEFAULT_PATH_SEPARATOR};
use serde::Deserialize;

const APP_DIR: &str = "courier";
const CONFIG_FILE_STEM: &str = "courier";
const ENV_PREFIX: &str = "COURIER";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("Invalid configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Settings of the collection tree engine and its storage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Directory holding `workspaces/{id}/collections.json`.
    pub data_dir: PathBuf,
    /// Workspace opened on start.
    pub workspace: String,
    /// Suffix appended to duplicated node names.
    pub copy_suffix: String,
    /// Separator between ancestor names in folder picker paths.
    pub path_separator: String,
    /// Name proposed for a new folder.
    pub default_folder_name: String,
    /// Name proposed for a new request.
    pub default_request_name: String,
    /// URL used for new requests created with a blank URL.
    pub default_url: String,
    /// Whether an empty workspace gets the starter tree.
    pub seed_starter_tree: bool,
}

impl EngineConfig {
    /// Returns the platform data directory for Courier, falling back to
    /// the working directory when the platform has none.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir().map_or_else(|| PathBuf::from(APP_DIR), |dir| dir.join(APP_DIR))
    }

    /// Loads the configuration, looking for a config file in the default
    /// data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file or variable has an invalid value.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_data_dir())
    }

    /// Loads the configuration, looking for a config file in `config_dir`.
    /// `data_dir` defaults to `config_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file or variable has an invalid value.
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let defaults = TreeSettings::default();
        let config = Config::builder()
            .set_default("data_dir", config_dir.to_string_lossy().into_owned())?
            .set_default("workspace", "default")?
            .set_default("copy_suffix", DEFAULT_COPY_SUFFIX)?
            .set_default("path_separator", DEFAULT_PATH_SEPARATOR)?
            .set_default("default_folder_name", defaults.default_folder_name)?
            .set_default("default_request_name", defaults.default_request_name)?
            .set_default("default_url", defaults.default_url)?
            .set_default("seed_starter_tree", true)?
            .add_source(File::from(config_dir.join(CONFIG_FILE_STEM)).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Returns the subset of settings the command dispatcher reads.
    #[must_use]
    pub fn tree_settings(&self) -> TreeSettings {
        TreeSettings {
            copy_suffix: self.copy_suffix.clone(),
            path_separator: self.path_separator.clone(),
            default_folder_name: self.default_folder_name.clone(),
            default_request_name: self.default_request_name.clone(),
            default_url: self.default_url.clone(),
            ..TreeSettings::default()
        }
    }
}
