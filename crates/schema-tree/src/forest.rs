//! Forest - arena storage for a built document tree.
//!
//! A `Forest` owns every node of one build in a flat vector indexed by
//! [`NodeId`], plus the ordered list of root ids. Forests are immutable once
//! built; loading a new document means building a new forest.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, TreeError};
use crate::node::{NodeId, NodeMetadata, NodeType, TreeNode};

/// Separator between display names in browse paths.
pub const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
}

impl Forest {
    /// Creates an empty forest.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(nodes: Vec<TreeNode>, roots: Vec<NodeId>) -> Self {
        Self { nodes, roots }
    }

    /// Returns the number of nodes across all trees.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets a node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.get())
    }

    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Root nodes in document order.
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode> {
        self.roots.iter().filter_map(|id| self.node(*id))
    }

    /// Children of `id` in document order; empty for files and unknown ids.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &TreeNode> {
        self.node(id)
            .map(TreeNode::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.node(*child))
    }

    /// Every node in pre-order (document order).
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Finds the node addressed by a `/`-separated sequence of display names.
    ///
    /// At each level the first node in document order with a matching name is
    /// followed. The empty path does not address a node.
    pub fn get(&self, path: &str) -> Result<&TreeNode> {
        let segments = split_path(path);
        if segments.is_empty() {
            return Err(TreeError::PathNotFound(path.to_string()));
        }
        self.find_by_names(&segments)
            .ok_or_else(|| TreeError::PathNotFound(path.to_string()))
    }

    /// Lists the nodes directly below `path`.
    ///
    /// The empty path lists the roots. Listing a file is an error, so callers
    /// can tell an empty folder apart from a leaf or a missing path.
    pub fn list(&self, path: &str) -> Result<Vec<&TreeNode>> {
        if split_path(path).is_empty() {
            return Ok(self.roots().collect());
        }
        let node = self.get(path)?;
        if !node.is_folder() {
            return Err(TreeError::NotAFolder(path.to_string()));
        }
        Ok(self.children(node.id()).collect())
    }

    /// Follows display names from the roots.
    pub fn find_by_names<S: AsRef<str>>(&self, names: &[S]) -> Option<&TreeNode> {
        let (first, rest) = names.split_first()?;
        let mut current = self.roots().find(|node| node.name() == first.as_ref())?;
        for name in rest {
            current = self
                .children(current.id())
                .find(|node| node.name() == name.as_ref())?;
        }
        Some(current)
    }

    /// Nested, serializable view of the whole forest.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.roots().map(|node| self.snapshot_node(node)).collect()
    }

    /// Nested, serializable view of one subtree.
    pub fn snapshot_node(&self, node: &TreeNode) -> NodeSnapshot {
        NodeSnapshot {
            id: node.id(),
            name: node.name().to_string(),
            kind: node.node_type(),
            value: node.value().cloned(),
            metadata: node.metadata().clone(),
            children: node.is_folder().then(|| {
                self.children(node.id())
                    .map(|child| self.snapshot_node(child))
                    .collect()
            }),
        }
    }
}

/// Serializable node view handed to browsing consumers.
///
/// `value` is present only on files and `children` only on folders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub metadata: NodeMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSnapshot>>,
}

fn split_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}
