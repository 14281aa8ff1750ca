//! Flattened rows for rendering the tree.

use courier_domain::{CollectionNode, Forest, NodeId, NodeKind};

use crate::expansion::ExpansionState;

/// A single visible row of the tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Node id.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Folder or request.
    pub kind: NodeKind,
    /// HTTP method badge, for requests only.
    pub method: Option<String>,
    /// Nesting depth for indentation.
    pub depth: u32,
    /// Whether the folder is shown open. Always `false` for requests.
    pub expanded: bool,
}

/// Flattens the filtered forest into the rows a tree view shows.
///
/// While a non-blank filter is active every folder is shown open so that
/// matches are never hidden behind a collapsed ancestor. The expansion map
/// is only read, never changed.
#[must_use]
pub fn visible_rows(forest: &Forest, expansion: &ExpansionState, filter: &str) -> Vec<TreeRow> {
    let filtered = forest.filter(filter);
    let open_all = !filter.trim().is_empty();
    let mut rows = Vec::new();
    flatten(filtered.nodes(), expansion, open_all, 0, &mut rows);
    rows
}

fn flatten(
    nodes: &[CollectionNode],
    expansion: &ExpansionState,
    open_all: bool,
    depth: u32,
    rows: &mut Vec<TreeRow>,
) {
    for node in nodes {
        match node {
            CollectionNode::Folder(folder) => {
                let expanded = open_all || expansion.is_expanded(&folder.id);
                rows.push(TreeRow {
                    id: folder.id.clone(),
                    name: folder.name.clone(),
                    kind: NodeKind::Folder,
                    method: None,
                    depth,
                    expanded,
                });
                if expanded {
                    flatten(&folder.children, expansion, open_all, depth + 1, rows);
                }
            }
            CollectionNode::Request(request) => rows.push(TreeRow {
                id: request.id.clone(),
                name: request.name.clone(),
                kind: NodeKind::Request,
                method: Some(request.request.method.clone()),
                depth,
                expanded: false,
            }),
        }
    }
}
