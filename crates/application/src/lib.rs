//! Courier Application - Collection tree session and commands
//!
//! This crate owns the canonical collection tree of a workspace and turns
//! user intents (commands, dialog submissions, drag gestures) into forest
//! operations. Storage and payload defaults are reached through ports.

pub mod dialog;
pub mod dispatcher;
pub mod drag;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod ports;
pub mod session;
pub mod settings;
pub mod starter;
pub mod use_cases;
pub mod view;

pub use dialog::{CreateDraft, Dialog, DialogOutcome, MoveOption};
pub use dispatcher::ActionDispatcher;
pub use drag::{DragController, DragState, DropOutcome, DropTarget, HoverTarget, Validity};
pub use engine::CollectionEngine;
pub use error::{ApplicationError, ApplicationResult};
pub use expansion::ExpansionState;
pub use session::{ChangeKind, CollectionSession, TreeChange, TreeObserver};
pub use settings::TreeSettings;
pub use starter::starter_forest;
pub use view::{TreeRow, visible_rows};
