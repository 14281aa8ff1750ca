//! Adapters implementing application ports.

mod request_defaults;

pub use request_defaults::{DEFAULT_HEADERS, DefaultRequestDataFactory};
