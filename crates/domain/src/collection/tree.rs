//! Recursive walkers shared by the forest operations.
//!
//! Every mutating operation is expressed as a [`rebuild`] over the node
//! sequence with a per-node decision; queries use [`find`] and [`locate`].

use std::cmp::Ordering;

use crate::id::NodeId;

use super::node::{CollectionNode, Folder};

/// What [`rebuild`] should do with the node it is visiting.
#[derive(Debug)]
pub enum Step {
    /// Keep the node; folders are rebuilt from their visited children.
    Keep,
    /// Put this node in its place and do not descend any further.
    Replace(CollectionNode),
    /// Leave the node (and its subtree) out of the result.
    Drop,
}

/// Rebuilds `nodes` into a new sequence, asking `visit` about every node in
/// depth-first order. The input is never modified.
pub fn rebuild<F>(nodes: &[CollectionNode], visit: &mut F) -> Vec<CollectionNode>
where
    F: FnMut(&CollectionNode) -> Step,
{
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match visit(node) {
            Step::Drop => {}
            Step::Replace(replacement) => out.push(replacement),
            Step::Keep => match node {
                CollectionNode::Folder(folder) => out.push(CollectionNode::Folder(Folder {
                    id: folder.id.clone(),
                    name: folder.name.clone(),
                    children: rebuild(&folder.children, visit),
                })),
                CollectionNode::Request(_) => out.push(node.clone()),
            },
        }
    }
    out
}

/// Finds a node anywhere below `nodes`, depth-first.
#[must_use]
pub fn find<'a>(nodes: &'a [CollectionNode], id: &NodeId) -> Option<&'a CollectionNode> {
    nodes.iter().find_map(|node| {
        if node.id() == id {
            Some(node)
        } else {
            find(node.children(), id)
        }
    })
}

/// Where a node lives: its parent folder (`None` for the root) and its
/// position among that parent's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Parent folder id, `None` at the root.
    pub parent: Option<NodeId>,
    /// Index within the parent's children.
    pub index: usize,
}

/// Finds the parent and index of a node.
#[must_use]
pub fn locate(nodes: &[CollectionNode], id: &NodeId, parent: Option<&NodeId>) -> Option<Location> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return Some(Location {
                parent: parent.cloned(),
                index,
            });
        }
        if let CollectionNode::Folder(folder) = node
            && let Some(found) = locate(&folder.children, id, Some(&folder.id))
        {
            return Some(found);
        }
    }
    None
}

/// Inserts `node` into `children` at `index`, clamped to the valid range.
#[must_use]
pub fn splice_in(children: &[CollectionNode], index: usize, node: CollectionNode) -> Vec<CollectionNode> {
    let mut next = children.to_vec();
    next.insert(index.min(next.len()), node);
    next
}

/// Orders names the way a locale-aware collator does for plain text.
///
/// Letters compare by their base form first, so accents and case only break
/// ties: `"e" < "é" < "f"`, and lowercase sorts before uppercase. Folding
/// covers Latin letters; other scripts compare by lowercase code point.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let lower = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    let (la, lb) = (lower(a), lower(b));
    la.iter()
        .map(|&c| fold_accent(c))
        .cmp(lb.iter().map(|&c| fold_accent(c)))
        .then_with(|| la.cmp(&lb))
        .then_with(|| b.cmp(a))
}

/// Maps an accented lowercase Latin letter to its base letter.
const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

/// Returns a copy of `nodes` with folders first, then names ascending.
///
/// Only this level is reordered; children of folders keep their order.
/// The sort is stable, so equal keys keep their relative position.
#[must_use]
pub fn sort_children(nodes: &[CollectionNode]) -> Vec<CollectionNode> {
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|a, b| match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(a.name(), b.name()),
    });
    sorted
}
