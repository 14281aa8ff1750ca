//! Collection tree: node model, forest operations and search.

mod filter;
mod forest;
mod node;
pub mod tree;

pub use filter::filter_nodes;
pub use forest::{
    DEFAULT_PATH_SEPARATOR, Destination, Forest, FolderOption, Removal, SortScope,
};
pub use node::{CollectionNode, DEFAULT_COPY_SUFFIX, Folder, NodeKind, RequestNode};
pub use tree::{Location, sort_children};
