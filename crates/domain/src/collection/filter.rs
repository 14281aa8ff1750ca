//! Text search over the collection tree.

use super::node::{CollectionNode, Folder};

/// Returns whether `node` itself matches the lowercase `needle`.
///
/// Folders match on their name; requests on name, URL or method.
fn matches(node: &CollectionNode, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    match node {
        CollectionNode::Folder(f) => contains(&f.name),
        CollectionNode::Request(r) => {
            contains(&r.name) || contains(&r.request.url) || contains(&r.request.method)
        }
    }
}

fn walk(nodes: &[CollectionNode], needle: &str) -> Vec<CollectionNode> {
    nodes
        .iter()
        .filter_map(|node| {
            if matches(node, needle) {
                // a direct hit surfaces the whole subtree
                return Some(node.clone());
            }
            match node {
                CollectionNode::Folder(f) => {
                    let children = walk(&f.children, needle);
                    (!children.is_empty()).then(|| {
                        CollectionNode::Folder(Folder {
                            id: f.id.clone(),
                            name: f.name.clone(),
                            children,
                        })
                    })
                }
                CollectionNode::Request(_) => None,
            }
        })
        .collect()
}

/// Returns the part of `nodes` matching `query`, case-insensitively.
///
/// A blank query returns the input unchanged. A folder whose own name
/// matches keeps all of its children; a folder kept only for a matching
/// descendant keeps just the branches leading to matches.
#[must_use]
pub fn filter_nodes(nodes: &[CollectionNode], query: &str) -> Vec<CollectionNode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return nodes.to_vec();
    }
    walk(nodes, &needle)
}
