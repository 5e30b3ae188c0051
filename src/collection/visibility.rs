//! Node visibility derived from ancestor expansion
//!
//! Visibility is never stored independently of expansion: every mutation of
//! the node sequence is followed by [`recompute`]. Parents are resolved once
//! per pass with a forward scan ([`TreeIndex`]), so recomputation is O(n).
//!
//! Rules:
//! - folders are always visible
//! - a tag group is visible if its folder is expanded, or always when it sits
//!   at root level
//! - a leaf is visible if its parent is both visible and expanded

use super::types::{CollectionNode, NodeKind};

/// Explicit parent pointers for a flattened node sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeIndex {
    parents: Vec<Option<usize>>,
}

impl TreeIndex {
    /// Resolve the implicit parent of every node in one forward pass
    ///
    /// A folder resets the tag group scope; a leaf belongs to the most recent
    /// tag group if there is one, otherwise to the most recent folder.
    #[must_use]
    pub fn build(nodes: &[CollectionNode]) -> Self {
        let mut parents = Vec::with_capacity(nodes.len());
        let mut folder: Option<usize> = None;
        let mut group: Option<usize> = None;

        for (idx, node) in nodes.iter().enumerate() {
            match node.kind {
                NodeKind::Folder => {
                    parents.push(None);
                    folder = Some(idx);
                    group = None;
                }
                NodeKind::TagGroup => {
                    parents.push(folder);
                    group = Some(idx);
                }
                NodeKind::Leaf => parents.push(group.or(folder)),
            }
        }

        Self { parents }
    }

    /// Parent index of a node
    #[must_use]
    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.parents.get(idx).copied().flatten()
    }

    /// Nesting depth of a node (0 for root-level nodes)
    #[must_use]
    pub fn depth(&self, idx: usize) -> usize {
        let mut depth = 0;
        let mut current = self.parent(idx);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Number of indexed nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Re-derive `visible` for every node from the expansion flags
///
/// Parents always precede their children, so a single forward pass sees each
/// parent's final visibility before its children. `expanded` is untouched.
pub fn recompute(nodes: &mut [CollectionNode]) {
    let index = TreeIndex::build(nodes);

    for idx in 0..nodes.len() {
        let visible = match (nodes[idx].kind, index.parent(idx)) {
            (NodeKind::Folder, _) | (_, None) => true,
            (NodeKind::TagGroup, Some(folder)) => nodes[folder].expanded,
            (NodeKind::Leaf, Some(parent)) => nodes[parent].visible && nodes[parent].expanded,
        };
        nodes[idx].visible = visible;
    }
}

/// Indices of the currently visible nodes, in display order
#[must_use]
pub fn visible_indices(nodes: &[CollectionNode]) -> Vec<usize> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.visible)
        .map(|(idx, _)| idx)
        .collect()
}

/// Toggle a container's expansion and recompute visibility
///
/// Returns `false` (and changes nothing) for leaves and out-of-range indices.
pub fn toggle_expanded(nodes: &mut [CollectionNode], idx: usize) -> bool {
    match nodes.get_mut(idx) {
        Some(node) if node.kind.is_container() => {
            node.expanded = !node.expanded;
            recompute(nodes);
            true
        }
        _ => false,
    }
}
