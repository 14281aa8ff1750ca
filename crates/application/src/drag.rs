//! Drag-and-drop relocation of tree nodes.
//!
//! A drag gesture spans many UI events (pick up, hover over rows, release).
//! [`DragController`] folds them into one authoritative [`DragState`] and
//! turns a release into at most one forest move.

use std::collections::BTreeSet;

use courier_domain::{CollectionNode, Destination, Forest, NodeId, NodeKind};
use tracing::debug;

use crate::session::{ChangeKind, CollectionSession};

/// What the pointer is currently over, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    /// The top-level drop zone.
    Root,
    /// A folder or request row.
    Node(NodeId),
    /// Anywhere that accepts no drop.
    Outside,
}

/// A resolved drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Move to the top level.
    Root,
    /// Append as the last child of this folder.
    Folder(NodeId),
    /// Take this request's position among its siblings.
    Request(NodeId),
}

impl DropTarget {
    fn resolve(forest: &Forest, target: &HoverTarget) -> Option<Self> {
        match target {
            HoverTarget::Root => Some(Self::Root),
            HoverTarget::Outside => None,
            HoverTarget::Node(id) => match forest.node(id)? {
                CollectionNode::Folder(_) => Some(Self::Folder(id.clone())),
                CollectionNode::Request(_) => Some(Self::Request(id.clone())),
            },
        }
    }

    const fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Root => None,
            Self::Folder(id) | Self::Request(id) => Some(id),
        }
    }

    fn destination(&self) -> Destination {
        match self {
            Self::Root => Destination::Root,
            Self::Folder(id) => Destination::Folder(id.clone()),
            Self::Request(id) => Destination::Before(id.clone()),
        }
    }
}

/// Whether releasing over the hovered target would move anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
    /// The move is legal.
    Valid,
    /// The target is the source itself or lies inside the dragged folder.
    Invalid,
}

impl Validity {
    /// Checks a drop of `source` onto `target` against `forest`.
    #[must_use]
    pub fn check(forest: &Forest, source: &NodeId, target: &DropTarget) -> Self {
        let Some(node) = forest.node(source) else {
            return Self::Invalid;
        };
        let legal = match target.node_id() {
            None => true,
            Some(target_id) => {
                target_id != source
                    && forest.contains(target_id)
                    && !(node.is_folder() && forest.is_descendant_of(source, target_id))
            }
        };
        if legal { Self::Valid } else { Self::Invalid }
    }

    /// Returns whether this is [`Validity::Valid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// State of the drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A node was picked up and is not over any target.
    Dragging {
        /// The dragged node.
        source: NodeId,
        /// Its kind.
        kind: NodeKind,
    },
    /// A node is being held over a drop target.
    Hovering {
        /// The dragged node.
        source: NodeId,
        /// Its kind.
        kind: NodeKind,
        /// The hovered target.
        target: DropTarget,
        /// Whether a release here would be accepted.
        validity: Validity,
    },
}

impl DragState {
    /// Returns the dragged node, if a gesture is in progress.
    #[must_use]
    pub const fn source(&self) -> Option<&NodeId> {
        match self {
            Self::Idle => None,
            Self::Dragging { source, .. } | Self::Hovering { source, .. } => Some(source),
        }
    }

    /// Returns the hovered target and its validity.
    #[must_use]
    pub const fn hovered(&self) -> Option<(&DropTarget, Validity)> {
        match self {
            Self::Hovering {
                target, validity, ..
            } => Some((target, *validity)),
            _ => None,
        }
    }

    /// Returns whether no gesture is in progress.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The node was moved.
    Committed {
        /// The moved node.
        source: NodeId,
        /// Where it was dropped.
        target: DropTarget,
    },
    /// Nothing changed.
    Cancelled,
}

/// Drives a drag gesture from pick-up to drop or cancel.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Picks up `id`. Unknown ids leave the controller idle; a gesture
    /// already in progress is replaced.
    pub fn begin(&mut self, forest: &Forest, id: &NodeId) -> &DragState {
        self.state = forest
            .node(id)
            .map_or(DragState::Idle, |node| DragState::Dragging {
                source: id.clone(),
                kind: node.kind(),
            });
        &self.state
    }

    /// Moves the pointer over `target`, recomputing validity from scratch.
    /// Ignored while idle.
    pub fn hover(&mut self, forest: &Forest, target: &HoverTarget) -> &DragState {
        let picked = match &self.state {
            DragState::Idle => None,
            DragState::Dragging { source, kind } | DragState::Hovering { source, kind, .. } => {
                Some((source.clone(), *kind))
            }
        };
        let Some((source, kind)) = picked else {
            return &self.state;
        };
        self.state = match DropTarget::resolve(forest, target) {
            Some(target) => {
                let validity = Validity::check(forest, &source, &target);
                DragState::Hovering {
                    source,
                    kind,
                    target,
                    validity,
                }
            }
            None => DragState::Dragging { source, kind },
        };
        &self.state
    }

    /// Releases the dragged node over the current target.
    ///
    /// Validity is checked again against the session's current forest
    /// instead of trusting what the last hover event computed. The
    /// controller is idle afterwards whatever the outcome.
    pub fn drop_on(&mut self, session: &mut CollectionSession) -> DropOutcome {
        let DragState::Hovering { source, target, .. } = std::mem::take(&mut self.state) else {
            debug!("drop without a hovered target");
            return DropOutcome::Cancelled;
        };

        // the row may have changed kind or vanished since the hover event
        let hovered = target
            .node_id()
            .map_or(HoverTarget::Root, |id| HoverTarget::Node(id.clone()));
        let Some(target) = DropTarget::resolve(session.forest(), &hovered) else {
            debug!(%source, "drop target no longer exists");
            return DropOutcome::Cancelled;
        };
        if !Validity::check(session.forest(), &source, &target).is_valid() {
            debug!(%source, ?target, "rejected illegal drop");
            return DropOutcome::Cancelled;
        }

        let Some(next) = session.forest().try_move(&source, &target.destination()) else {
            debug!(%source, ?target, "drop produced no move");
            return DropOutcome::Cancelled;
        };
        if &next == session.forest() {
            debug!(%source, ?target, "drop left the tree unchanged");
            return DropOutcome::Cancelled;
        }

        let opened = match &target {
            DropTarget::Root => None,
            DropTarget::Folder(id) => Some(id.clone()),
            DropTarget::Request(id) => next.locate_parent(id).and_then(|l| l.parent),
        };
        session.commit(ChangeKind::Moved, next, BTreeSet::new());
        if let Some(folder) = opened {
            session.expand(&folder);
        }
        DropOutcome::Committed { source, target }
    }

    /// Abandons the gesture without touching the tree.
    pub fn cancel(&mut self) -> &DragState {
        self.state = DragState::Idle;
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use courier_domain::{Folder, RequestData, RequestNode};
    use pretty_assertions::assert_eq;

    use super::*;

    fn id(value: &str) -> NodeId {
        NodeId::new(value)
    }

    /// outer (f1) > [inner (f2) > [deep (r2)], first (r1)], loose (r3)
    fn session() -> CollectionSession {
        let request = |node_id: &str| -> CollectionNode {
            RequestNode::with_id(node_id, node_id, RequestData::new("GET", "/")).into()
        };
        CollectionSession::new(Forest::from(vec![
            Folder::with_id("f1", "outer")
                .with_children(vec![
                    Folder::with_id("f2", "inner")
                        .with_children(vec![request("r2")])
                        .into(),
                    request("r1"),
                ])
                .into(),
            request("r3"),
        ]))
    }

    #[test]
    fn test_begin_unknown_stays_idle() {
        let session = session();
        let mut drag = DragController::new();
        assert!(drag.begin(session.forest(), &id("ghost")).is_idle());
    }

    #[test]
    fn test_hover_while_idle_is_ignored() {
        let session = session();
        let mut drag = DragController::new();
        assert!(drag.hover(session.forest(), &HoverTarget::Root).is_idle());
    }

    #[test]
    fn test_hover_validity_per_target() {
        let session = session();
        let forest = session.forest();
        let mut drag = DragController::new();
        drag.begin(forest, &id("f1"));

        let validity = |state: &DragState| state.hovered().map(|(_, v)| v);
        assert_eq!(
            validity(drag.hover(forest, &HoverTarget::Node(id("f1")))),
            Some(Validity::Invalid)
        );
        assert_eq!(
            validity(drag.hover(forest, &HoverTarget::Node(id("f2")))),
            Some(Validity::Invalid)
        );
        assert_eq!(
            validity(drag.hover(forest, &HoverTarget::Node(id("r2")))),
            Some(Validity::Invalid)
        );
        assert_eq!(
            validity(drag.hover(forest, &HoverTarget::Node(id("r3")))),
            Some(Validity::Valid)
        );
        assert_eq!(
            validity(drag.hover(forest, &HoverTarget::Root)),
            Some(Validity::Valid)
        );
        assert_eq!(
            drag.hover(forest, &HoverTarget::Outside),
            &DragState::Dragging {
                source: id("f1"),
                kind: NodeKind::Folder
            }
        );
    }

    #[test]
    fn test_drop_on_folder_appends_and_expands() {
        let mut session = session();
        session.toggle_expanded(&id("f2"));
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("r3"));
        drag.hover(session.forest(), &HoverTarget::Node(id("f2")));

        let outcome = drag.drop_on(&mut session);
        assert_eq!(
            outcome,
            DropOutcome::Committed {
                source: id("r3"),
                target: DropTarget::Folder(id("f2"))
            }
        );
        let children: Vec<&str> = session
            .node(&id("f2"))
            .map(|n| n.children().iter().map(|c| c.id().as_str()).collect())
            .unwrap_or_default();
        assert_eq!(children, vec!["r2", "r3"]);
        assert!(session.expansion().is_expanded(&id("f2")));
        assert!(drag.state().is_idle());
    }

    #[test]
    fn test_drop_on_request_takes_its_position() {
        let mut session = session();
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("r3"));
        drag.hover(session.forest(), &HoverTarget::Node(id("r1")));
        drag.drop_on(&mut session);

        let children: Vec<&str> = session
            .node(&id("f1"))
            .map(|n| n.children().iter().map(|c| c.id().as_str()).collect())
            .unwrap_or_default();
        assert_eq!(children, vec!["f2", "r3", "r1"]);
    }

    #[test]
    fn test_drop_onto_next_sibling_swaps_them() {
        let mut session = session();
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("f2"));
        drag.hover(session.forest(), &HoverTarget::Node(id("r1")));

        assert_eq!(
            drag.drop_on(&mut session),
            DropOutcome::Committed {
                source: id("f2"),
                target: DropTarget::Request(id("r1"))
            }
        );
        let children: Vec<&str> = session
            .node(&id("f1"))
            .map(|n| n.children().iter().map(|c| c.id().as_str()).collect())
            .unwrap_or_default();
        assert_eq!(children, vec!["r1", "f2"]);
    }

    #[test]
    fn test_drop_without_effect_does_not_commit() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut session = session();
        let commits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&commits);
        session.subscribe(move |_: &crate::session::TreeChange| sink.set(sink.get() + 1));
        let before = session.forest().clone();

        // r3 is already the last top-level node
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("r3"));
        drag.hover(session.forest(), &HoverTarget::Root);

        assert_eq!(drag.drop_on(&mut session), DropOutcome::Cancelled);
        assert_eq!(session.forest(), &before);
        assert_eq!(commits.get(), 0);
        assert!(drag.state().is_idle());
    }

    #[test]
    fn test_drop_on_root() {
        let mut session = session();
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("r2"));
        drag.hover(session.forest(), &HoverTarget::Root);
        drag.drop_on(&mut session);

        let top: Vec<&str> = session
            .forest()
            .nodes()
            .iter()
            .map(|n| n.id().as_str())
            .collect();
        assert_eq!(top, vec!["f1", "r3", "r2"]);
    }

    #[test]
    fn test_drop_on_invalid_target_is_noop() {
        let mut session = session();
        let before = session.forest().clone();
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("f1"));
        drag.hover(session.forest(), &HoverTarget::Node(id("f2")));

        assert_eq!(drag.drop_on(&mut session), DropOutcome::Cancelled);
        assert_eq!(session.forest(), &before);
        assert!(drag.state().is_idle());
    }

    #[test]
    fn test_drop_rechecks_against_current_forest() {
        let mut session = session();
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("f2"));
        drag.hover(session.forest(), &HoverTarget::Node(id("r3")));
        assert_eq!(
            drag.state().hovered().map(|(_, v)| v),
            Some(Validity::Valid)
        );

        // r3 ends up inside f2 before the release arrives
        let next = session
            .forest()
            .move_node(&id("r3"), &Destination::Folder(id("f2")));
        session.commit(ChangeKind::Moved, next, BTreeSet::new());
        let before = session.forest().clone();

        assert_eq!(drag.drop_on(&mut session), DropOutcome::Cancelled);
        assert_eq!(session.forest(), &before);
    }

    #[test]
    fn test_drop_without_hover_cancels() {
        let mut session = session();
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("r1"));
        assert_eq!(drag.drop_on(&mut session), DropOutcome::Cancelled);
    }

    #[test]
    fn test_cancel_after_hovering_is_pure_noop() {
        let mut session = session();
        let forest_before = session.forest().clone();
        let expansion_before = session.expansion().clone();
        let mut drag = DragController::new();
        drag.begin(session.forest(), &id("r1"));
        for target in [
            HoverTarget::Node(id("f2")),
            HoverTarget::Root,
            HoverTarget::Node(id("r3")),
            HoverTarget::Outside,
        ] {
            drag.hover(session.forest(), &target);
        }
        assert!(drag.cancel().is_idle());
        assert_eq!(session.forest(), &forest_before);
        assert_eq!(session.expansion(), &expansion_before);
    }
}
