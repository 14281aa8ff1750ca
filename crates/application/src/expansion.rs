//! Expanded/collapsed flags of folder rows.

use std::collections::HashMap;

use courier_domain::{Forest, NodeId};

/// Which folders are shown open.
///
/// Presentation-only state keyed by node id. It never lives inside the
/// nodes, so it plays no part in forest equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    flags: HashMap<NodeId, bool>,
}

impl ExpansionState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state where every folder of `forest` is open.
    #[must_use]
    pub fn all_open(forest: &Forest) -> Self {
        let mut state = Self::new();
        state.sync(forest);
        state
    }

    /// Returns whether a folder is open. Unknown ids are closed.
    #[must_use]
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Returns whether a flag is recorded for `id`.
    #[must_use]
    pub fn tracks(&self, id: &NodeId) -> bool {
        self.flags.contains_key(id)
    }

    /// Number of recorded flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns whether no flags are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Opens a folder.
    pub fn expand(&mut self, id: &NodeId) {
        self.flags.insert(id.clone(), true);
    }

    /// Closes a folder.
    pub fn collapse(&mut self, id: &NodeId) {
        self.flags.insert(id.clone(), false);
    }

    /// Flips a folder between open and closed.
    pub fn toggle(&mut self, id: &NodeId) {
        let open = self.is_expanded(id);
        self.flags.insert(id.clone(), !open);
    }

    /// Forgets the flags of the given ids.
    pub fn forget<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>) {
        for id in ids {
            self.flags.remove(id);
        }
    }

    /// Opens every folder of `forest` that has no flag yet; existing flags
    /// are left alone.
    pub fn sync(&mut self, forest: &Forest) {
        for id in forest.folder_ids() {
            self.flags.entry(id).or_insert(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use courier_domain::Folder;

    use super::*;

    #[test]
    fn test_toggle_expanded() {
        let mut state = ExpansionState::new();
        let id = NodeId::new("test-id");

        assert!(!state.is_expanded(&id));

        state.toggle(&id);
        assert!(state.is_expanded(&id));

        state.toggle(&id);
        assert!(!state.is_expanded(&id));
    }

    #[test]
    fn test_sync_keeps_existing_flags() {
        let forest = Forest::from(vec![
            Folder::with_id("a", "A")
                .with_children(vec![Folder::with_id("b", "B").into()])
                .into(),
        ]);
        let mut state = ExpansionState::new();
        state.collapse(&NodeId::new("a"));
        state.sync(&forest);

        assert!(!state.is_expanded(&NodeId::new("a")));
        assert!(state.is_expanded(&NodeId::new("b")));
    }

    #[test]
    fn test_forget() {
        let mut state = ExpansionState::new();
        let id = NodeId::new("gone");
        state.expand(&id);
        state.forget([&id]);
        assert!(!state.tracks(&id));
        assert!(state.is_empty());
    }
}
