//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the tree engine and its collaborators.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod file_system;
mod forest_repository;
mod request_factory;

pub use file_system::{FileSystem, FileSystemError};
pub use forest_repository::{ForestRepository, ForestStoreError};
pub use request_factory::RequestDataFactory;
