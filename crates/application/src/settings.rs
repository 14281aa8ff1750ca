//! Tunables the tree commands read.

use courier_domain::collection::{DEFAULT_COPY_SUFFIX, DEFAULT_PATH_SEPARATOR};

/// Naming and defaulting rules used by the command dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSettings {
    /// Suffix appended to duplicated node names.
    pub copy_suffix: String,
    /// Separator between ancestor names in folder picker paths.
    pub path_separator: String,
    /// Label of the top-level destination in the move dialog.
    pub root_label: String,
    /// Name proposed for a new folder.
    pub default_folder_name: String,
    /// Name proposed for a new request.
    pub default_request_name: String,
    /// URL used when a new request is created with a blank URL.
    pub default_url: String,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            copy_suffix: DEFAULT_COPY_SUFFIX.to_string(),
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            root_label: "Root".to_string(),
            default_folder_name: "New Folder".to_string(),
            default_request_name: "New Request".to_string(),
            default_url: "https://example.com".to_string(),
        }
    }
}
