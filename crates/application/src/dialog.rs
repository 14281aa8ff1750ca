//! Transient dialog state owned by the command dispatcher.

use courier_domain::{NodeId, NodeKind, RequestType};

/// Form values of the "new folder / new request" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDraft {
    /// Folder to create in, `None` for the top level.
    pub parent: Option<NodeId>,
    /// What to create.
    pub kind: NodeKind,
    /// Name typed so far.
    pub name: String,
    /// Protocol of a new request.
    pub request_type: RequestType,
    /// Method of a new request.
    pub method: String,
    /// URL of a new request; blank falls back to the configured default.
    pub url: String,
}

/// An entry of the move dialog's destination list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOption {
    /// Destination folder, `None` for the top level.
    pub id: Option<NodeId>,
    /// Text shown for the entry.
    pub label: String,
}

/// The dialog currently open, if any. At most one is open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Creating a node.
    Create(CreateDraft),
    /// Renaming a node.
    Rename {
        /// Node being renamed.
        target: NodeId,
        /// Name typed so far.
        name: String,
    },
    /// Waiting for the user to confirm a deletion.
    Delete {
        /// Node to delete.
        target: NodeId,
        /// Its kind, for the confirmation message.
        kind: NodeKind,
        /// Its name, for the confirmation message.
        name: String,
    },
    /// Choosing where to move a node.
    Move {
        /// Node being moved.
        target: NodeId,
        /// Legal destinations.
        options: Vec<MoveOption>,
        /// Selected destination, `None` for the top level.
        destination: Option<NodeId>,
    },
}

/// Result of submitting the open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// No dialog was open.
    NoDialog,
    /// The input was rejected (blank name); the dialog stays open.
    Rejected,
    /// The dialog closed without changing the tree.
    Unchanged,
    /// The tree changed; carries the affected node.
    Committed(NodeId),
}
