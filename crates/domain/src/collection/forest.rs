//! The forest value and its pure operations.
//!
//! Every operation borrows the current forest and returns a new one; the
//! receiver is never modified. Callers install the returned value as the new
//! canonical state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::NodeId;
use crate::request::RequestData;

use super::filter::filter_nodes;
use super::node::{CollectionNode, Folder};
use super::tree::{self, Location, Step};

/// Separator placed between ancestor names in folder picker paths.
pub const DEFAULT_PATH_SEPARATOR: &str = " / ";

/// Where a moved node should end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Appended at the top level.
    Root,
    /// Appended as the last child of a folder.
    Folder(NodeId),
    /// Takes the index another node holds before the move, in that node's
    /// parent. Moving down within the same parent therefore lands just after
    /// the other node, so adjacent siblings swap.
    Before(NodeId),
    /// Inserted at an explicit index of a parent (`None` = root).
    At {
        /// Parent folder, `None` for the root.
        parent: Option<NodeId>,
        /// Index among the parent's children, clamped.
        index: usize,
    },
}

/// Scope of a sort operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortScope {
    /// The top-level sequence.
    Root,
    /// The direct children of one folder.
    Folder(NodeId),
}

/// Outcome of [`Forest::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The forest without the removed subtree.
    pub forest: Forest,
    /// Whether anything was removed.
    pub removed: bool,
    /// Ids of the removed node and every node below it.
    pub removed_ids: BTreeSet<NodeId>,
}

/// An entry of the folder picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderOption {
    /// Folder id.
    pub id: NodeId,
    /// Ancestor names and the folder's own name, joined by a separator.
    pub display_path: String,
}

/// The ordered top-level sequence of collection nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    nodes: Vec<CollectionNode>,
}

impl From<Vec<CollectionNode>> for Forest {
    fn from(nodes: Vec<CollectionNode>) -> Self {
        Self { nodes }
    }
}

impl FromIterator<CollectionNode> for Forest {
    fn from_iter<I: IntoIterator<Item = CollectionNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Returns the top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[CollectionNode] {
        &self.nodes
    }

    /// Consumes the forest, returning the top-level nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<CollectionNode> {
        self.nodes
    }

    /// Returns whether the forest has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes, at every depth.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(CollectionNode::subtree_size).sum()
    }

    /// Every id in the forest, depth-first.
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for node in &self.nodes {
            node.collect_ids(&mut ids);
        }
        ids
    }

    /// Ids of every folder, depth-first.
    #[must_use]
    pub fn folder_ids(&self) -> Vec<NodeId> {
        fn walk(nodes: &[CollectionNode], out: &mut Vec<NodeId>) {
            for node in nodes {
                if let CollectionNode::Folder(f) = node {
                    out.push(f.id.clone());
                    walk(&f.children, out);
                }
            }
        }
        let mut ids = Vec::new();
        walk(&self.nodes, &mut ids);
        ids
    }

    /// Looks a node up by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&CollectionNode> {
        tree::find(&self.nodes, id)
    }

    /// Returns whether a node with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Finds the parent and index of a node.
    #[must_use]
    pub fn locate_parent(&self, id: &NodeId) -> Option<Location> {
        tree::locate(&self.nodes, id, None)
    }

    /// Returns whether `id` lies anywhere below `ancestor`, excluding
    /// `ancestor` itself. Unknown ids are never descendants.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &NodeId, id: &NodeId) -> bool {
        self.node(ancestor)
            .is_some_and(|node| node.has_descendant(id))
    }

    /// Inserts `node` under `parent` (`None` = root) at `index`, clamped to
    /// the current number of children.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownParent`] if `parent` does not exist and
    /// [`DomainError::NotAFolder`] if it names a request.
    pub fn insert_at(
        &self,
        parent: Option<&NodeId>,
        index: usize,
        node: CollectionNode,
    ) -> DomainResult<Self> {
        let Some(parent_id) = parent else {
            return Ok(Self::from(tree::splice_in(&self.nodes, index, node)));
        };

        match self.node(parent_id) {
            None => return Err(DomainError::UnknownParent(parent_id.clone())),
            Some(CollectionNode::Request(_)) => {
                return Err(DomainError::NotAFolder(parent_id.clone()));
            }
            Some(CollectionNode::Folder(_)) => {}
        }

        let mut node = Some(node);
        let nodes = tree::rebuild(&self.nodes, &mut |current| match current {
            CollectionNode::Folder(f) if &f.id == parent_id => match node.take() {
                Some(inserted) => Step::Replace(CollectionNode::Folder(Folder {
                    id: f.id.clone(),
                    name: f.name.clone(),
                    children: tree::splice_in(&f.children, index, inserted),
                })),
                None => Step::Keep,
            },
            _ => Step::Keep,
        });
        Ok(Self::from(nodes))
    }

    /// Appends `node` as the last child of `parent` (`None` = root).
    ///
    /// # Errors
    ///
    /// Same as [`Self::insert_at`].
    pub fn append(&self, parent: Option<&NodeId>, node: CollectionNode) -> DomainResult<Self> {
        self.insert_at(parent, usize::MAX, node)
    }

    /// Detaches the node with `id`, returning the remaining forest and the
    /// node, or `None` when no such node exists.
    #[must_use]
    pub fn extract(&self, id: &NodeId) -> (Self, Option<CollectionNode>) {
        let mut extracted = None;
        let nodes = tree::rebuild(&self.nodes, &mut |node| {
            if extracted.is_none() && node.id() == id {
                extracted = Some(node.clone());
                Step::Drop
            } else {
                Step::Keep
            }
        });
        match extracted {
            Some(node) => (Self::from(nodes), Some(node)),
            None => (self.clone(), None),
        }
    }

    /// Deletes the node with `id` and its whole subtree.
    #[must_use]
    pub fn remove(&self, id: &NodeId) -> Removal {
        let (forest, extracted) = self.extract(id);
        let mut removed_ids = Vec::new();
        if let Some(node) = &extracted {
            node.collect_ids(&mut removed_ids);
        }
        Removal {
            forest,
            removed: extracted.is_some(),
            removed_ids: removed_ids.into_iter().collect(),
        }
    }

    /// Renames a node. Blank names are ignored and the forest is returned
    /// unchanged; surrounding whitespace is trimmed.
    #[must_use]
    pub fn rename(&self, id: &NodeId, name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return self.clone();
        }
        self.replace_node(id, |node| node.renamed(trimmed))
    }

    /// Replaces the payload of a request node. Folders and unknown ids are
    /// left untouched.
    #[must_use]
    pub fn update_request(&self, id: &NodeId, data: &RequestData) -> Self {
        self.replace_node(id, |node| match node {
            CollectionNode::Request(r) => {
                let mut next = r.clone();
                next.request = data.clone();
                CollectionNode::Request(next)
            }
            CollectionNode::Folder(_) => node.clone(),
        })
    }

    /// Sorts one level of the forest: the root sequence or the direct
    /// children of a folder.
    #[must_use]
    pub fn sort(&self, scope: &SortScope) -> Self {
        match scope {
            SortScope::Root => Self::from(tree::sort_children(&self.nodes)),
            SortScope::Folder(id) => self.replace_node(id, |node| match node {
                CollectionNode::Folder(f) => CollectionNode::Folder(Folder {
                    id: f.id.clone(),
                    name: f.name.clone(),
                    children: tree::sort_children(&f.children),
                }),
                CollectionNode::Request(_) => node.clone(),
            }),
        }
    }

    /// Returns the subset of the forest matching `query`.
    #[must_use]
    pub fn filter(&self, query: &str) -> Self {
        Self::from(filter_nodes(&self.nodes, query))
    }

    /// Enumerates folders for a destination picker.
    ///
    /// When `excluding` names a folder, that folder and its whole subtree are
    /// left out, since a folder can be moved neither into itself nor into one
    /// of its descendants.
    #[must_use]
    pub fn list_folders(&self, excluding: Option<&NodeId>, separator: &str) -> Vec<FolderOption> {
        fn walk(
            nodes: &[CollectionNode],
            prefix: &str,
            excluding: Option<&NodeId>,
            separator: &str,
            out: &mut Vec<FolderOption>,
        ) {
            for node in nodes {
                let CollectionNode::Folder(f) = node else {
                    continue;
                };
                if excluding == Some(&f.id) {
                    continue;
                }
                let display_path = format!("{prefix}{}", f.name);
                let child_prefix = format!("{display_path}{separator}");
                out.push(FolderOption {
                    id: f.id.clone(),
                    display_path,
                });
                walk(&f.children, &child_prefix, excluding, separator, out);
            }
        }

        let mut options = Vec::new();
        walk(&self.nodes, "", excluding, separator, &mut options);
        options
    }

    /// Returns whether moving `id` under `parent` (`None` = root) is legal:
    /// the node exists, the parent is an existing folder other than the
    /// node, and a moved folder never lands inside its own subtree.
    #[must_use]
    pub fn can_move(&self, id: &NodeId, parent: Option<&NodeId>) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let Some(parent_id) = parent else {
            return true;
        };
        if parent_id == id {
            return false;
        }
        if !matches!(self.node(parent_id), Some(CollectionNode::Folder(_))) {
            return false;
        }
        !(node.is_folder() && node.has_descendant(parent_id))
    }

    /// Moves a node, returning `None` when the move is illegal or either end
    /// is missing.
    #[must_use]
    pub fn try_move(&self, id: &NodeId, destination: &Destination) -> Option<Self> {
        match destination {
            Destination::Root => self.relocate(id, None, usize::MAX),
            Destination::Folder(parent) => self.relocate(id, Some(parent), usize::MAX),
            Destination::At { parent, index } => self.relocate(id, parent.as_ref(), *index),
            Destination::Before(sibling) => {
                if sibling == id || self.is_descendant_of(id, sibling) {
                    return None;
                }
                let target = self.locate_parent(sibling)?;
                if !self.can_move(id, target.parent.as_ref()) {
                    return None;
                }
                let (rest, node) = self.extract(id);
                rest.insert_at(target.parent.as_ref(), target.index, node?)
                    .ok()
            }
        }
    }

    /// Moves a node, returning the forest unchanged when the move is illegal.
    #[must_use]
    pub fn move_node(&self, id: &NodeId, destination: &Destination) -> Self {
        self.try_move(id, destination)
            .unwrap_or_else(|| self.clone())
    }

    fn relocate(&self, id: &NodeId, parent: Option<&NodeId>, index: usize) -> Option<Self> {
        if !self.can_move(id, parent) {
            return None;
        }
        let (rest, node) = self.extract(id);
        rest.insert_at(parent, index, node?).ok()
    }

    fn replace_node<F>(&self, id: &NodeId, replace: F) -> Self
    where
        F: Fn(&CollectionNode) -> CollectionNode,
    {
        let nodes = tree::rebuild(&self.nodes, &mut |node| {
            if node.id() == id {
                Step::Replace(replace(node))
            } else {
                Step::Keep
            }
        });
        Self::from(nodes)
    }
}
