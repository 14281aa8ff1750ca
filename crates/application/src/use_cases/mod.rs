//! Application use cases (business logic orchestration).

mod load_forest;
mod save_forest;

pub use load_forest::*;
pub use save_forest::*;
