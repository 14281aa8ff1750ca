//! Canonical tree state and change notifications.

use std::collections::BTreeSet;
use std::fmt;

use courier_domain::{CollectionNode, Forest, NodeId, RequestData};
use tracing::info;

use crate::expansion::ExpansionState;

/// What kind of mutation produced a [`TreeChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A node was created.
    Created,
    /// A node was renamed.
    Renamed,
    /// A subtree was deleted.
    Deleted,
    /// A subtree was duplicated.
    Duplicated,
    /// A node was moved, by drag-and-drop or through the move dialog.
    Moved,
    /// One level of the tree was sorted.
    Sorted,
    /// A request payload was replaced.
    RequestUpdated,
    /// The whole forest was swapped (load, workspace switch).
    Replaced,
}

/// Notification emitted after every committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange {
    /// What happened.
    pub kind: ChangeKind,
    /// The new canonical forest.
    pub forest: Forest,
    /// Ids that no longer exist, so hosts can drop per-id state they own
    /// (open editor tabs, selection). Empty for everything but deletions.
    pub removed_ids: BTreeSet<NodeId>,
}

/// Receives [`TreeChange`] notifications.
pub trait TreeObserver {
    /// Called once per committed mutation, after the new state is installed.
    fn on_change(&mut self, change: &TreeChange);
}

impl<F> TreeObserver for F
where
    F: FnMut(&TreeChange),
{
    fn on_change(&mut self, change: &TreeChange) {
        self(change);
    }
}

/// Owner of the canonical forest and the expansion map.
///
/// Every mutation installs a complete new forest; nothing is edited in place.
/// A rejected command never reaches [`Self::commit`], so there is nothing to
/// roll back.
#[derive(Default)]
pub struct CollectionSession {
    forest: Forest,
    expansion: ExpansionState,
    observers: Vec<Box<dyn TreeObserver>>,
}

impl fmt::Debug for CollectionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionSession")
            .field("forest", &self.forest)
            .field("expansion", &self.expansion)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CollectionSession {
    /// Creates a session over `forest` with every folder open.
    #[must_use]
    pub fn new(forest: Forest) -> Self {
        let expansion = ExpansionState::all_open(&forest);
        Self {
            forest,
            expansion,
            observers: Vec::new(),
        }
    }

    /// Returns the canonical forest.
    #[must_use]
    pub const fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Looks a node up by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&CollectionNode> {
        self.forest.node(id)
    }

    /// Returns the expansion map.
    #[must_use]
    pub const fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Registers an observer for committed mutations.
    pub fn subscribe(&mut self, observer: impl TreeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Flips a folder between open and closed.
    pub fn toggle_expanded(&mut self, id: &NodeId) {
        self.expansion.toggle(id);
    }

    /// Opens a folder.
    pub fn expand(&mut self, id: &NodeId) {
        self.expansion.expand(id);
    }

    /// Swaps the whole forest, e.g. after loading another workspace.
    /// Folders present in both trees keep their flags.
    pub fn replace_forest(&mut self, forest: Forest) {
        let stale: Vec<NodeId> = self
            .forest
            .folder_ids()
            .into_iter()
            .filter(|id| !forest.contains(id))
            .collect();
        self.expansion.forget(&stale);
        self.commit(ChangeKind::Replaced, forest, BTreeSet::new());
    }

    /// Replaces the payload of a request node. Returns whether a request
    /// with that id existed.
    pub fn update_request(&mut self, id: &NodeId, data: &RequestData) -> bool {
        if !matches!(self.forest.node(id), Some(CollectionNode::Request(_))) {
            return false;
        }
        let next = self.forest.update_request(id, data);
        self.commit(ChangeKind::RequestUpdated, next, BTreeSet::new());
        true
    }

    /// Installs a new forest, prunes expansion flags of removed ids, opens
    /// folders seen for the first time and notifies observers.
    pub fn commit(&mut self, kind: ChangeKind, forest: Forest, removed_ids: BTreeSet<NodeId>) {
        self.expansion.forget(&removed_ids);
        self.expansion.sync(&forest);
        self.forest = forest;

        info!(
            ?kind,
            nodes = self.forest.node_count(),
            removed = removed_ids.len(),
            "collection tree changed"
        );

        if self.observers.is_empty() {
            return;
        }
        let change = TreeChange {
            kind,
            forest: self.forest.clone(),
            removed_ids,
        };
        for observer in &mut self.observers {
            observer.on_change(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use courier_domain::{Folder, RequestNode};
    use pretty_assertions::assert_eq;

    use super::*;

    fn forest() -> Forest {
        Forest::from(vec![
            Folder::with_id("f", "Folder")
                .with_children(vec![
                    RequestNode::with_id("r", "Req", RequestData::new("GET", "/")).into(),
                ])
                .into(),
        ])
    }

    #[test]
    fn test_new_session_opens_all_folders() {
        let session = CollectionSession::new(forest());
        assert!(session.expansion().is_expanded(&NodeId::new("f")));
    }

    #[test]
    fn test_commit_notifies_observers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut session = CollectionSession::new(forest());
        session.subscribe(move |change: &TreeChange| sink.borrow_mut().push(change.kind));

        session.replace_forest(Forest::new());
        assert_eq!(*seen.borrow(), vec![ChangeKind::Replaced]);
        assert!(session.forest().is_empty());
    }

    #[test]
    fn test_commit_prunes_removed_ids() {
        let mut session = CollectionSession::new(forest());
        let removal = session.forest().remove(&NodeId::new("f"));
        session.commit(ChangeKind::Deleted, removal.forest, removal.removed_ids);
        assert!(!session.expansion().tracks(&NodeId::new("f")));
    }

    #[test]
    fn test_replace_forest_drops_flags_of_vanished_folders() {
        let mut session = CollectionSession::new(forest());
        session.toggle_expanded(&NodeId::new("f"));

        session.replace_forest(Forest::from(vec![Folder::with_id("g", "Other").into()]));
        assert!(!session.expansion().tracks(&NodeId::new("f")));
        assert_eq!(session.expansion().len(), 1);

        session.replace_forest(forest());
        session.toggle_expanded(&NodeId::new("f"));
        session.replace_forest(forest());
        assert!(!session.expansion().is_expanded(&NodeId::new("f")));
        assert_eq!(session.expansion().len(), 1);
    }

    #[test]
    fn test_update_request() {
        let mut session = CollectionSession::new(forest());
        let data = RequestData::new("POST", "https://reqres.in/api/users");
        assert!(session.update_request(&NodeId::new("r"), &data));
        assert!(!session.update_request(&NodeId::new("f"), &data));

        let Some(CollectionNode::Request(r)) = session.node(&NodeId::new("r")) else {
            unreachable!("r is a request");
        };
        assert_eq!(r.request.method, "POST");
    }
}
