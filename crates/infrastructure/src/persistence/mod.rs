//! Persistence adapters.

mod file_system;
mod forest_repository;
mod normalize;

pub use file_system::TokioFileSystem;
pub use forest_repository::FileSystemForestRepository;
pub use normalize::ForestNormalizer;
