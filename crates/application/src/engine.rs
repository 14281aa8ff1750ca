//! Single entry point a host UI drives the tree through.

use std::collections::BTreeSet;

use courier_domain::{
    CollectionNode, FolderOption, Forest, NodeId, NodeKind, RequestData, SortScope,
};

use crate::dialog::{CreateDraft, Dialog, DialogOutcome};
use crate::dispatcher::ActionDispatcher;
use crate::drag::{DragController, DragState, DropOutcome, HoverTarget};
use crate::expansion::ExpansionState;
use crate::ports::RequestDataFactory;
use crate::session::{CollectionSession, TreeObserver};
use crate::settings::TreeSettings;
use crate::view::{TreeRow, visible_rows};

/// Session, command dispatcher and drag controller behind one API.
#[derive(Debug)]
pub struct CollectionEngine<F: RequestDataFactory> {
    session: CollectionSession,
    dispatcher: ActionDispatcher<F>,
    drag: DragController,
}

impl<F: RequestDataFactory> CollectionEngine<F> {
    /// Creates an engine over `forest` with every folder open.
    #[must_use]
    pub fn new(forest: Forest, factory: F, settings: TreeSettings) -> Self {
        Self {
            session: CollectionSession::new(forest),
            dispatcher: ActionDispatcher::new(factory, settings),
            drag: DragController::new(),
        }
    }

    // === Queries ===

    /// Returns the canonical forest.
    #[must_use]
    pub const fn forest(&self) -> &Forest {
        self.session.forest()
    }

    /// Looks a node up by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&CollectionNode> {
        self.session.node(id)
    }

    /// Lists folders with their display paths, optionally skipping one
    /// folder and its descendants.
    #[must_use]
    pub fn list_folders(&self, excluding: Option<&NodeId>) -> Vec<FolderOption> {
        self.session
            .forest()
            .list_folders(excluding, &self.dispatcher.settings().path_separator)
    }

    /// Returns the rows to render for the given filter text.
    #[must_use]
    pub fn visible_rows(&self, filter: &str) -> Vec<TreeRow> {
        visible_rows(self.session.forest(), self.session.expansion(), filter)
    }

    /// Returns the expansion map.
    #[must_use]
    pub const fn expansion(&self) -> &ExpansionState {
        self.session.expansion()
    }

    /// Returns the open dialog.
    #[must_use]
    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dispatcher.dialog()
    }

    /// Returns the open dialog for editing its form values.
    pub const fn dialog_mut(&mut self) -> Option<&mut Dialog> {
        self.dispatcher.dialog_mut()
    }

    /// Returns the drag gesture state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    // === Session ===

    /// Registers an observer for committed mutations.
    pub fn subscribe(&mut self, observer: impl TreeObserver + 'static) {
        self.session.subscribe(observer);
    }

    /// Flips a folder between open and closed.
    pub fn toggle_expanded(&mut self, id: &NodeId) {
        self.session.toggle_expanded(id);
    }

    /// Swaps the whole forest. Any drag in progress or open dialog is
    /// abandoned since it refers to the old tree.
    pub fn replace_forest(&mut self, forest: Forest) {
        self.drag.cancel();
        self.dispatcher.cancel_dialog();
        self.session.replace_forest(forest);
    }

    /// Replaces the payload of a request node.
    pub fn update_request(&mut self, id: &NodeId, data: &RequestData) -> bool {
        self.session.update_request(id, data)
    }

    // === Commands ===

    /// Opens the create dialog under `parent`.
    pub fn begin_create(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Option<&Dialog> {
        self.dispatcher.begin_create(&self.session, parent, kind)
    }

    /// Creates a node directly, without a dialog.
    pub fn create(&mut self, draft: &CreateDraft) -> Option<NodeId> {
        self.dispatcher.create(&mut self.session, draft)
    }

    /// Opens the rename dialog.
    pub fn begin_rename(&mut self, id: &NodeId) -> Option<&Dialog> {
        self.dispatcher.begin_rename(&self.session, id)
    }

    /// Renames a node directly, without a dialog.
    pub fn rename(&mut self, id: &NodeId, name: &str) -> bool {
        self.dispatcher.rename(&mut self.session, id, name)
    }

    /// Asks for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: &NodeId) -> Option<&Dialog> {
        self.dispatcher.request_delete(&self.session, id)
    }

    /// Deletes the node awaiting confirmation.
    pub fn confirm_delete(&mut self) -> Option<BTreeSet<NodeId>> {
        self.dispatcher.confirm_delete(&mut self.session)
    }

    /// Inserts a copy of `id` right after it.
    pub fn duplicate(&mut self, id: &NodeId) -> Option<NodeId> {
        self.dispatcher.duplicate(&mut self.session, id)
    }

    /// Opens the move dialog for `id`.
    pub fn open_move_dialog(&mut self, id: &NodeId) -> Option<&Dialog> {
        self.dispatcher.open_move_dialog(&self.session, id)
    }

    /// Selects a destination in the open move dialog.
    pub fn choose_destination(&mut self, destination: Option<NodeId>) -> bool {
        self.dispatcher.choose_destination(destination)
    }

    /// Commits the open move dialog.
    pub fn confirm_move(&mut self) -> bool {
        self.dispatcher.confirm_move(&mut self.session)
    }

    /// Moves a node directly, without a dialog.
    pub fn move_to(&mut self, id: &NodeId, destination: Option<&NodeId>) -> bool {
        self.dispatcher.move_to(&mut self.session, id, destination)
    }

    /// Sorts one level of the tree.
    pub fn sort(&mut self, scope: &SortScope) -> bool {
        self.dispatcher.sort(&mut self.session, scope)
    }

    /// Submits the open dialog.
    pub fn submit_dialog(&mut self) -> DialogOutcome {
        self.dispatcher.submit(&mut self.session)
    }

    /// Closes the open dialog without doing anything.
    pub fn cancel_dialog(&mut self) {
        self.dispatcher.cancel_dialog();
    }

    // === Drag and drop ===

    /// Picks up a node.
    pub fn begin_drag(&mut self, id: &NodeId) -> &DragState {
        self.drag.begin(self.session.forest(), id)
    }

    /// Reports what the pointer is over.
    pub fn hover(&mut self, target: &HoverTarget) -> &DragState {
        self.drag.hover(self.session.forest(), target)
    }

    /// Releases the dragged node. The controller is idle afterwards.
    pub fn drop_dragged(&mut self) -> DropOutcome {
        self.drag.drop_on(&mut self.session)
    }

    /// Abandons the drag gesture.
    pub fn cancel_drag(&mut self) -> &DragState {
        self.drag.cancel()
    }
}
