//! Collection node types

use serde::{Deserialize, Serialize};

use crate::id::NodeId;
use crate::request::RequestData;

/// Suffix appended to the names of duplicated nodes.
pub const DEFAULT_COPY_SUFFIX: &str = " Copy";

/// Discriminant of a [`CollectionNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A folder
    Folder,
    /// A saved request
    Request,
}

impl NodeKind {
    /// Prefix used when minting ids for this kind.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Request => "req",
        }
    }
}

/// A folder containing requests and other folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier
    pub id: NodeId,
    /// Folder name
    pub name: String,
    /// Children in display order
    #[serde(default)]
    pub children: Vec<CollectionNode>,
}

impl Folder {
    /// Creates a new empty folder with a freshly minted id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(NodeId::generate(NodeKind::Folder.id_prefix()), name)
    }

    /// Creates a new empty folder with the given id.
    #[must_use]
    pub fn with_id(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Sets the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<CollectionNode>) -> Self {
        self.children = children;
        self
    }
}

/// A saved request leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestNode {
    /// Unique identifier
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Opaque request payload
    #[serde(default)]
    pub request: RequestData,
}

impl RequestNode {
    /// Creates a new request node with a freshly minted id.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestData) -> Self {
        Self::with_id(NodeId::generate(NodeKind::Request.id_prefix()), name, request)
    }

    /// Creates a new request node with the given id.
    #[must_use]
    pub fn with_id(id: impl Into<NodeId>, name: impl Into<String>, request: RequestData) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            request,
        }
    }
}

/// A node of the collection tree (either a folder or a request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollectionNode {
    /// A folder containing other nodes
    Folder(Folder),
    /// A saved request
    Request(RequestNode),
}

impl From<Folder> for CollectionNode {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

impl From<RequestNode> for CollectionNode {
    fn from(request: RequestNode) -> Self {
        Self::Request(request)
    }
}

impl CollectionNode {
    /// Returns the ID of this node.
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        match self {
            Self::Folder(f) => &f.id,
            Self::Request(r) => &r.id,
        }
    }

    /// Returns the name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Request(r) => &r.name,
        }
    }

    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Folder(_) => NodeKind::Folder,
            Self::Request(_) => NodeKind::Request,
        }
    }

    /// Returns whether this node is a folder.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// Returns the children of a folder; requests have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Folder(f) => &f.children,
            Self::Request(_) => &[],
        }
    }

    /// Returns a copy of this node carrying a different name.
    #[must_use]
    pub fn renamed(&self, name: &str) -> Self {
        let mut next = self.clone();
        match &mut next {
            Self::Folder(f) => name.clone_into(&mut f.name),
            Self::Request(r) => name.clone_into(&mut r.name),
        }
        next
    }

    /// Total number of nodes in this subtree, counting itself.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self.children().iter().map(Self::subtree_size).sum::<usize>()
    }

    /// Appends the id of this node and every descendant, depth-first.
    pub fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id().clone());
        for child in self.children() {
            child.collect_ids(out);
        }
    }

    /// Returns whether `id` appears strictly below this node.
    #[must_use]
    pub fn has_descendant(&self, id: &NodeId) -> bool {
        self.children()
            .iter()
            .any(|child| child.id() == id || child.has_descendant(id))
    }

    /// Copies this subtree, minting fresh ids everywhere and suffixing every
    /// copied name with [`DEFAULT_COPY_SUFFIX`].
    #[must_use]
    pub fn clone_subtree(&self) -> Self {
        self.clone_subtree_with_suffix(DEFAULT_COPY_SUFFIX)
    }

    /// Same as [`Self::clone_subtree`] with a caller-chosen suffix.
    #[must_use]
    pub fn clone_subtree_with_suffix(&self, suffix: &str) -> Self {
        let name = format!("{}{suffix}", self.name());
        match self {
            Self::Folder(f) => Self::Folder(
                Folder::new(name).with_children(
                    f.children
                        .iter()
                        .map(|child| child.clone_subtree_with_suffix(suffix))
                        .collect(),
                ),
            ),
            Self::Request(r) => Self::Request(RequestNode::new(name, r.request.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> CollectionNode {
        Folder::with_id("users", "Users")
            .with_children(vec![
                RequestNode::with_id("list", "List Users", RequestData::new("GET", "/users"))
                    .into(),
                Folder::with_id("profiles", "Profiles")
                    .with_children(vec![
                        RequestNode::with_id("patch", "Patch", RequestData::new("PATCH", "/u/2"))
                            .into(),
                    ])
                    .into(),
            ])
            .into()
    }

    #[test]
    fn test_tagged_serialization() {
        let node: CollectionNode = Folder::with_id("f1", "Starter").into();
        let json = serde_json::to_value(&node).unwrap_or_default();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["id"], "f1");
        assert_eq!(json["children"], serde_json::json!([]));
    }

    #[test]
    fn test_subtree_size_and_ids() {
        let node = sample();
        assert_eq!(node.subtree_size(), 4);

        let mut ids = Vec::new();
        node.collect_ids(&mut ids);
        let ids: Vec<&str> = ids.iter().map(NodeId::as_str).collect();
        assert_eq!(ids, vec!["users", "list", "profiles", "patch"]);
    }

    #[test]
    fn test_has_descendant_excludes_self() {
        let node = sample();
        assert!(node.has_descendant(&NodeId::new("patch")));
        assert!(!node.has_descendant(&NodeId::new("users")));
    }

    #[test]
    fn test_clone_subtree_is_fresh() {
        let node = sample();
        let copy = node.clone_subtree();

        let mut original_ids = Vec::new();
        node.collect_ids(&mut original_ids);
        let mut copy_ids = Vec::new();
        copy.collect_ids(&mut copy_ids);

        assert_eq!(copy_ids.len(), original_ids.len());
        assert!(copy_ids.iter().all(|id| !original_ids.contains(id)));
        assert_eq!(copy.name(), "Users Copy");
        assert_eq!(copy.children()[0].name(), "List Users Copy");
        assert_eq!(node.name(), "Users");
    }

    #[test]
    fn test_clone_subtree_copies_payload() {
        let node: CollectionNode =
            RequestNode::with_id("r", "Fact", RequestData::new("GET", "https://catfact.ninja/fact"))
                .into();
        let CollectionNode::Request(copy) = node.clone_subtree() else {
            unreachable!("request clones stay requests");
        };
        assert_eq!(copy.request.url, "https://catfact.ninja/fact");
    }
}
