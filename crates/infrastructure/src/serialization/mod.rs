//! Deterministic JSON serialization for stored collection trees.
//!
//! Saved trees diff cleanly because output always uses 2-space indentation
//! and ends with a trailing newline.

mod json;

pub use json::*;
