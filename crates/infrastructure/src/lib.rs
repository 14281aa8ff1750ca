//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod configuration;
pub mod persistence;
pub mod serialization;

pub use adapters::{DEFAULT_HEADERS, DefaultRequestDataFactory};
pub use configuration::{ConfigError, EngineConfig};
pub use persistence::{FileSystemForestRepository, ForestNormalizer, TokioFileSystem};
pub use serialization::{SerializationError, from_json_value, parse_json_value, to_json_stable};
