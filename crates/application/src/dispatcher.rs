//! Discrete tree commands: create, rename, delete, duplicate, move, sort.
//!
//! Each command validates its input against the session's current forest,
//! computes a new forest with the pure domain operations and commits it.
//! Rejected input (blank names, illegal moves, stale ids) leaves the
//! session untouched and is only logged.

use std::collections::BTreeSet;

use courier_domain::{
    CollectionNode, Destination, Folder, Forest, NodeId, NodeKind, RequestNode, RequestType,
    SortScope,
};
use tracing::{debug, warn};

use crate::dialog::{CreateDraft, Dialog, DialogOutcome, MoveOption};
use crate::ports::RequestDataFactory;
use crate::session::{ChangeKind, CollectionSession};
use crate::settings::TreeSettings;

/// Maps user commands onto forest operations and owns the dialog that a
/// command may need before it can run.
#[derive(Debug)]
pub struct ActionDispatcher<F: RequestDataFactory> {
    factory: F,
    settings: TreeSettings,
    dialog: Option<Dialog>,
}

impl<F: RequestDataFactory> ActionDispatcher<F> {
    /// Creates a dispatcher with no dialog open.
    #[must_use]
    pub const fn new(factory: F, settings: TreeSettings) -> Self {
        Self {
            factory,
            settings,
            dialog: None,
        }
    }

    /// Returns the naming rules in effect.
    #[must_use]
    pub const fn settings(&self) -> &TreeSettings {
        &self.settings
    }

    /// Returns the open dialog.
    #[must_use]
    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Returns the open dialog for editing its form values.
    pub const fn dialog_mut(&mut self) -> Option<&mut Dialog> {
        self.dialog.as_mut()
    }

    /// Closes the open dialog without doing anything.
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    // === Create ===

    /// Opens the create dialog with default values. `parent` must be an
    /// existing folder or `None` for the top level.
    pub fn begin_create(
        &mut self,
        session: &CollectionSession,
        parent: Option<NodeId>,
        kind: NodeKind,
    ) -> Option<&Dialog> {
        if let Some(parent_id) = &parent
            && !is_folder(session.forest(), parent_id)
        {
            debug!(%parent_id, "create target is not a folder");
            return None;
        }
        let name = match kind {
            NodeKind::Folder => self.settings.default_folder_name.clone(),
            NodeKind::Request => self.settings.default_request_name.clone(),
        };
        let request_type = RequestType::default();
        self.dialog = Some(Dialog::Create(CreateDraft {
            parent,
            kind,
            name,
            request_type,
            method: request_type.default_method().to_string(),
            url: self.settings.default_url.clone(),
        }));
        self.dialog.as_ref()
    }

    /// Creates a node at the end of its parent's children and opens the
    /// parent (and a new folder). Returns the new id.
    pub fn create(&self, session: &mut CollectionSession, draft: &CreateDraft) -> Option<NodeId> {
        let name = draft.name.trim();
        if name.is_empty() {
            debug!("rejected create with blank name");
            return None;
        }
        if let Some(parent_id) = &draft.parent
            && !is_folder(session.forest(), parent_id)
        {
            debug!(%parent_id, "create target is not a folder");
            return None;
        }

        let node: CollectionNode = match draft.kind {
            NodeKind::Folder => Folder::new(name).into(),
            NodeKind::Request => {
                let method = match draft.method.trim() {
                    "" => draft.request_type.default_method(),
                    method => method,
                };
                let url = match draft.url.trim() {
                    "" => self.settings.default_url.as_str(),
                    url => url,
                };
                RequestNode::new(name, self.factory.build(method, url, draft.request_type)).into()
            }
        };
        let id = node.id().clone();

        let next = match session.forest().append(draft.parent.as_ref(), node) {
            Ok(next) => next,
            Err(err) => {
                warn!(%err, "create failed");
                return None;
            }
        };
        session.commit(ChangeKind::Created, next, BTreeSet::new());
        if let Some(parent_id) = &draft.parent {
            session.expand(parent_id);
        }
        if draft.kind == NodeKind::Folder {
            session.expand(&id);
        }
        Some(id)
    }

    // === Rename ===

    /// Opens the rename dialog prefilled with the node's current name.
    pub fn begin_rename(&mut self, session: &CollectionSession, id: &NodeId) -> Option<&Dialog> {
        let node = session.node(id)?;
        self.dialog = Some(Dialog::Rename {
            target: id.clone(),
            name: node.name().to_string(),
        });
        self.dialog.as_ref()
    }

    /// Renames a node. Blank names and unknown ids are ignored.
    pub fn rename(&self, session: &mut CollectionSession, id: &NodeId, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            debug!(%id, "rejected blank rename");
            return false;
        }
        match session.node(id) {
            None => {
                debug!(%id, "rename target is gone");
                false
            }
            Some(node) if node.name() == trimmed => false,
            Some(_) => {
                let next = session.forest().rename(id, trimmed);
                session.commit(ChangeKind::Renamed, next, BTreeSet::new());
                true
            }
        }
    }

    // === Delete ===

    /// First phase of a deletion: asks for confirmation.
    pub fn request_delete(&mut self, session: &CollectionSession, id: &NodeId) -> Option<&Dialog> {
        let node = session.node(id)?;
        self.dialog = Some(Dialog::Delete {
            target: id.clone(),
            kind: node.kind(),
            name: node.name().to_string(),
        });
        self.dialog.as_ref()
    }

    /// Second phase of a deletion: removes the confirmed subtree and returns
    /// every removed id. Does nothing unless a delete confirmation is open.
    pub fn confirm_delete(&mut self, session: &mut CollectionSession) -> Option<BTreeSet<NodeId>> {
        if !matches!(self.dialog, Some(Dialog::Delete { .. })) {
            return None;
        }
        let Some(Dialog::Delete { target, .. }) = self.dialog.take() else {
            return None;
        };
        Self::delete(session, &target)
    }

    fn delete(session: &mut CollectionSession, id: &NodeId) -> Option<BTreeSet<NodeId>> {
        let removal = session.forest().remove(id);
        if !removal.removed {
            debug!(%id, "delete target is gone");
            return None;
        }
        let removed_ids = removal.removed_ids.clone();
        session.commit(ChangeKind::Deleted, removal.forest, removal.removed_ids);
        Some(removed_ids)
    }

    // === Duplicate ===

    /// Inserts a deep copy with fresh ids right after the original.
    /// Returns the id of the copy.
    pub fn duplicate(&self, session: &mut CollectionSession, id: &NodeId) -> Option<NodeId> {
        let forest = session.forest();
        let Some(location) = forest.locate_parent(id) else {
            debug!(%id, "duplicate target is gone");
            return None;
        };
        let copy = forest
            .node(id)?
            .clone_subtree_with_suffix(&self.settings.copy_suffix);
        let copy_id = copy.id().clone();

        let next = match forest.insert_at(location.parent.as_ref(), location.index + 1, copy) {
            Ok(next) => next,
            Err(err) => {
                warn!(%err, "duplicate failed");
                return None;
            }
        };
        session.commit(ChangeKind::Duplicated, next, BTreeSet::new());
        Some(copy_id)
    }

    // === Move ===

    /// Lists legal destinations for `id`: the top level, then every folder
    /// except the node itself and, for folders, its descendants.
    #[must_use]
    pub fn move_options(&self, forest: &Forest, id: &NodeId) -> Vec<MoveOption> {
        let excluding = forest.node(id).filter(|n| n.is_folder()).map(CollectionNode::id);
        let root = MoveOption {
            id: None,
            label: self.settings.root_label.clone(),
        };
        std::iter::once(root)
            .chain(
                forest
                    .list_folders(excluding, &self.settings.path_separator)
                    .into_iter()
                    .map(|option| MoveOption {
                        id: Some(option.id),
                        label: option.display_path,
                    }),
            )
            .collect()
    }

    /// Opens the move dialog with the top level preselected.
    pub fn open_move_dialog(
        &mut self,
        session: &CollectionSession,
        id: &NodeId,
    ) -> Option<&Dialog> {
        session.node(id)?;
        self.dialog = Some(Dialog::Move {
            target: id.clone(),
            options: self.move_options(session.forest(), id),
            destination: None,
        });
        self.dialog.as_ref()
    }

    /// Selects a destination in the open move dialog. Destinations that are
    /// not among the offered options are refused.
    pub fn choose_destination(&mut self, choice: Option<NodeId>) -> bool {
        let Some(Dialog::Move {
            options,
            destination,
            ..
        }) = self.dialog.as_mut()
        else {
            return false;
        };
        if !options.iter().any(|option| option.id == choice) {
            return false;
        }
        *destination = choice;
        true
    }

    /// Commits the open move dialog. Does nothing unless one is open.
    pub fn confirm_move(&mut self, session: &mut CollectionSession) -> bool {
        if !matches!(self.dialog, Some(Dialog::Move { .. })) {
            return false;
        }
        matches!(self.submit(session), DialogOutcome::Committed(_))
    }

    /// Moves `id` to the end of `destination` (`None` = top level).
    /// Illegal moves and moves to the current parent change nothing.
    pub fn move_to(
        &self,
        session: &mut CollectionSession,
        id: &NodeId,
        destination: Option<&NodeId>,
    ) -> bool {
        let Some(location) = session.forest().locate_parent(id) else {
            debug!(%id, "move target is gone");
            return false;
        };
        if location.parent.as_ref() == destination {
            debug!(%id, "move to current parent ignored");
            return false;
        }
        let target = destination.map_or(Destination::Root, |folder| {
            Destination::Folder(folder.clone())
        });
        let Some(next) = session.forest().try_move(id, &target) else {
            debug!(%id, ?target, "rejected illegal move");
            return false;
        };
        session.commit(ChangeKind::Moved, next, BTreeSet::new());
        if let Some(folder) = destination {
            session.expand(folder);
        }
        true
    }

    // === Sort ===

    /// Sorts the top level or the direct children of one folder.
    pub fn sort(&self, session: &mut CollectionSession, scope: &SortScope) -> bool {
        if let SortScope::Folder(id) = scope
            && !is_folder(session.forest(), id)
        {
            debug!(%id, "sort target is not a folder");
            return false;
        }
        let next = session.forest().sort(scope);
        session.commit(ChangeKind::Sorted, next, BTreeSet::new());
        true
    }

    // === Dialog submission ===

    /// Runs the command behind the open dialog.
    ///
    /// Blank names keep the dialog open and report [`DialogOutcome::Rejected`];
    /// everything else closes it.
    pub fn submit(&mut self, session: &mut CollectionSession) -> DialogOutcome {
        let Some(dialog) = self.dialog.take() else {
            return DialogOutcome::NoDialog;
        };
        match dialog {
            Dialog::Create(draft) => {
                if draft.name.trim().is_empty() {
                    self.dialog = Some(Dialog::Create(draft));
                    return DialogOutcome::Rejected;
                }
                self.create(session, &draft)
                    .map_or(DialogOutcome::Unchanged, DialogOutcome::Committed)
            }
            Dialog::Rename { target, name } => {
                if name.trim().is_empty() {
                    self.dialog = Some(Dialog::Rename { target, name });
                    return DialogOutcome::Rejected;
                }
                if self.rename(session, &target, &name) {
                    DialogOutcome::Committed(target)
                } else {
                    DialogOutcome::Unchanged
                }
            }
            Dialog::Delete { target, .. } => Self::delete(session, &target)
                .map_or(DialogOutcome::Unchanged, |_| DialogOutcome::Committed(target)),
            Dialog::Move {
                target,
                destination,
                ..
            } => {
                if self.move_to(session, &target, destination.as_ref()) {
                    DialogOutcome::Committed(target)
                } else {
                    DialogOutcome::Unchanged
                }
            }
        }
    }
}

fn is_folder(forest: &Forest, id: &NodeId) -> bool {
    matches!(forest.node(id), Some(CollectionNode::Folder(_)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use courier_domain::RequestData;
    use pretty_assertions::assert_eq;

    use super::*;

    type Factory = fn(&str, &str, RequestType) -> RequestData;

    fn factory(method: &str, url: &str, request_type: RequestType) -> RequestData {
        RequestData::new(method, url).with_request_type(request_type)
    }

    fn dispatcher() -> ActionDispatcher<Factory> {
        ActionDispatcher::new(factory as Factory, TreeSettings::default())
    }

    fn id(value: &str) -> NodeId {
        NodeId::new(value)
    }

    fn request(node_id: &str, name: &str) -> CollectionNode {
        RequestNode::with_id(node_id, name, RequestData::new("GET", "https://example.com")).into()
    }

    /// F1 "Root" > [N1 "R1", F2 "Sub" > []]
    fn session() -> CollectionSession {
        CollectionSession::new(Forest::from(vec![
            Folder::with_id("F1", "Root")
                .with_children(vec![request("N1", "R1"), Folder::with_id("F2", "Sub").into()])
                .into(),
        ]))
    }

    fn child_ids(session: &CollectionSession, parent: &str) -> Vec<String> {
        session
            .node(&id(parent))
            .map(|n| n.children().iter().map(|c| c.id().to_string()).collect())
            .unwrap_or_default()
    }

    fn draft(parent: Option<&str>, kind: NodeKind, name: &str) -> CreateDraft {
        CreateDraft {
            parent: parent.map(id),
            kind,
            name: name.to_string(),
            request_type: RequestType::Http,
            method: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn test_create_request_uses_factory_defaults() {
        let dispatcher = dispatcher();
        let mut session = session();
        session.toggle_expanded(&id("F2"));

        let mut input = draft(Some("F2"), NodeKind::Request, "  Ping  ");
        input.request_type = RequestType::Websocket;
        let created = dispatcher.create(&mut session, &input).unwrap_or_else(|| id("none"));

        let Some(CollectionNode::Request(node)) = session.node(&created) else {
            unreachable!("created a request");
        };
        assert_eq!(node.name, "Ping");
        assert_eq!(node.request.method, "WS");
        assert_eq!(node.request.url, "https://example.com");
        assert_eq!(node.request.request_type, RequestType::Websocket);
        assert_eq!(child_ids(&session, "F2"), vec![created.to_string()]);
        assert!(session.expansion().is_expanded(&id("F2")));
    }

    #[test]
    fn test_create_folder_at_root_is_expanded() {
        let dispatcher = dispatcher();
        let mut session = session();
        let created = dispatcher
            .create(&mut session, &draft(None, NodeKind::Folder, "New Folder"))
            .unwrap_or_else(|| id("none"));
        assert_eq!(session.forest().nodes()[1].id(), &created);
        assert!(session.expansion().is_expanded(&created));
    }

    #[test]
    fn test_create_rejects_blank_name_and_request_parent() {
        let dispatcher = dispatcher();
        let mut session = session();
        let before = session.forest().clone();
        assert!(dispatcher.create(&mut session, &draft(None, NodeKind::Folder, "  ")).is_none());
        assert!(
            dispatcher
                .create(&mut session, &draft(Some("N1"), NodeKind::Folder, "x"))
                .is_none()
        );
        assert_eq!(session.forest(), &before);
    }

    #[test]
    fn test_rename() {
        let dispatcher = dispatcher();
        let mut session = session();
        assert!(dispatcher.rename(&mut session, &id("N1"), " Renamed "));
        assert_eq!(session.node(&id("N1")).map(CollectionNode::name), Some("Renamed"));
        assert!(!dispatcher.rename(&mut session, &id("N1"), "   "));
        assert!(!dispatcher.rename(&mut session, &id("ghost"), "x"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut dispatcher = dispatcher();
        let mut session = session();
        let before = session.forest().clone();

        assert!(dispatcher.confirm_delete(&mut session).is_none());
        dispatcher.request_delete(&session, &id("F2"));
        assert_eq!(session.forest(), &before);

        dispatcher.cancel_dialog();
        assert!(dispatcher.confirm_delete(&mut session).is_none());
        assert_eq!(session.forest(), &before);

        dispatcher.request_delete(&session, &id("F2"));
        let removed = dispatcher.confirm_delete(&mut session);
        assert_eq!(removed, Some([id("F2")].into_iter().collect()));
        assert!(!session.expansion().tracks(&id("F2")));
        assert!(dispatcher.dialog().is_none());
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let dispatcher = dispatcher();
        let mut session = session();
        let original = session.node(&id("N1")).cloned();
        let copy = dispatcher
            .duplicate(&mut session, &id("N1"))
            .unwrap_or_else(|| id("none"));
        assert_eq!(
            child_ids(&session, "F1"),
            vec!["N1".to_string(), copy.to_string(), "F2".to_string()]
        );
        assert_eq!(session.node(&copy).map(CollectionNode::name), Some("R1 Copy"));
        assert_eq!(session.node(&id("N1")).cloned(), original);
        assert!(dispatcher.duplicate(&mut session, &id("ghost")).is_none());
    }

    #[test]
    fn test_duplicate_folder_gets_fresh_ids() {
        let dispatcher = dispatcher();
        let mut session = session();
        let total = session.forest().node_count();
        dispatcher.duplicate(&mut session, &id("F1"));

        let ids = session.forest().ids();
        let unique: HashSet<&NodeId> = ids.iter().collect();
        assert_eq!(ids.len(), total * 2);
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_move_options_exclude_self_and_descendants() {
        let dispatcher = dispatcher();
        let session = session();
        let labels: Vec<String> = dispatcher
            .move_options(session.forest(), &id("F1"))
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Root"]);

        let for_request: Vec<String> = dispatcher
            .move_options(session.forest(), &id("N1"))
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(for_request, vec!["Root", "Root", "Root / Sub"]);
    }

    #[test]
    fn test_move_dialog_flow() {
        let mut dispatcher = dispatcher();
        let mut session = session();
        dispatcher.open_move_dialog(&session, &id("N1"));
        assert!(!dispatcher.choose_destination(Some(id("N1"))));
        assert!(dispatcher.choose_destination(Some(id("F2"))));
        assert!(dispatcher.confirm_move(&mut session));
        assert_eq!(child_ids(&session, "F2"), vec!["N1"]);
        assert!(session.expansion().is_expanded(&id("F2")));
        assert!(!dispatcher.confirm_move(&mut session));
    }

    #[test]
    fn test_move_to_current_parent_is_noop() {
        let dispatcher = dispatcher();
        let mut session = session();
        let before = session.forest().clone();
        assert!(!dispatcher.move_to(&mut session, &id("N1"), Some(&id("F1"))));
        assert!(!dispatcher.move_to(&mut session, &id("F1"), Some(&id("F2"))));
        assert_eq!(session.forest(), &before);
    }

    #[test]
    fn test_sort_folder_and_root() {
        let dispatcher = dispatcher();
        let mut session = session();
        assert!(dispatcher.sort(&mut session, &SortScope::Folder(id("F1"))));
        assert_eq!(child_ids(&session, "F1"), vec!["F2", "N1"]);
        assert!(!dispatcher.sort(&mut session, &SortScope::Folder(id("N1"))));
        assert!(dispatcher.sort(&mut session, &SortScope::Root));
    }

    #[test]
    fn test_submit_rename_keeps_dialog_on_blank() {
        let mut dispatcher = dispatcher();
        let mut session = session();
        dispatcher.begin_rename(&session, &id("F2"));
        if let Some(Dialog::Rename { name, .. }) = dispatcher.dialog_mut() {
            "  ".clone_into(name);
        }
        assert_eq!(dispatcher.submit(&mut session), DialogOutcome::Rejected);
        assert!(dispatcher.dialog().is_some());

        if let Some(Dialog::Rename { name, .. }) = dispatcher.dialog_mut() {
            "Nested".clone_into(name);
        }
        assert_eq!(
            dispatcher.submit(&mut session),
            DialogOutcome::Committed(id("F2"))
        );
        assert_eq!(session.node(&id("F2")).map(CollectionNode::name), Some("Nested"));
    }

    #[test]
    fn test_begin_create_prefills_defaults() {
        let mut dispatcher = dispatcher();
        let session = session();
        let Some(Dialog::Create(draft)) =
            dispatcher.begin_create(&session, Some(id("F1")), NodeKind::Request).cloned()
        else {
            unreachable!("create dialog opened");
        };
        assert_eq!(draft.name, "New Request");
        assert_eq!(draft.method, "GET");
        assert!(dispatcher.begin_create(&session, Some(id("N1")), NodeKind::Folder).is_none());
    }
}
