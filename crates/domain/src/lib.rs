//! Courier Domain - Collection tree model
//!
//! This crate defines the collection tree of the Courier request client:
//! folders and saved requests, the forest that holds them, and the pure
//! operations that compute a new forest from an old one.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod error;
pub mod id;
pub mod request;

pub use collection::{
    CollectionNode, Destination, Folder, FolderOption, Forest, Location, NodeKind, Removal,
    RequestNode, SortScope,
};
pub use error::{DomainError, DomainResult};
pub use id::NodeId;
pub use request::{KeyValue, RequestData, RequestType};
