//! Node view helpers for computing derived properties from forest nodes.
//!
//! Paths and depths are not stored on nodes; they are recomputed by walking
//! the parent chain, which keeps them tied to node identity rather than to
//! names that may repeat elsewhere in the forest.

use crate::forest::Forest;
use crate::node::NodeId;

/// A view into a node that can compute derived properties.
pub struct NodeView<'a> {
    forest: &'a Forest,
    id: NodeId,
}

impl<'a> NodeView<'a> {
    #[inline]
    pub fn new(forest: &'a Forest, id: NodeId) -> Self {
        Self { forest, id }
    }

    /// Display names from a root down to and including this node.
    ///
    /// Returns `None` if the node (or any ancestor) is not in the forest.
    pub fn compute_path(&self) -> Option<Vec<String>> {
        let mut segments = Vec::new();
        let mut current = self.id;

        loop {
            let node = self.forest.node(current)?;
            segments.push(node.name().to_string());

            match node.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        segments.reverse();
        Some(segments)
    }

    /// Computes the depth (number of ancestors, 0 for roots).
    pub fn compute_depth(&self) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.id;

        loop {
            let node = self.forest.node(current)?;
            match node.parent() {
                Some(parent) => {
                    depth += 1;
                    current = parent;
                }
                None => break,
            }
        }

        Some(depth)
    }
}

/// Ancestor display names from a root down to `id`, inclusive.
pub fn path_to(forest: &Forest, id: NodeId) -> Option<Vec<String>> {
    NodeView::new(forest, id).compute_path()
}

/// Number of ancestors above `id`; 0 for a root.
pub fn depth_of(forest: &Forest, id: NodeId) -> Option<usize> {
    NodeView::new(forest, id).compute_depth()
}
