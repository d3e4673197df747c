//! Node types for the document forest.
//!
//! Nodes live in a flat arena owned by [`crate::Forest`] and refer to each
//! other through [`NodeId`]s, so every node keeps a stable identity for the
//! lifetime of the forest it was built into.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thin_vec::ThinVec;

/// A compact 32-bit index into the forest arena.
///
/// Ids are assigned in pre-order while the forest is built, so sorting by id
/// reproduces document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new NodeId from an arena position.
    ///
    /// # Panics
    /// Panics if `index` does not fit in a u32.
    #[inline]
    pub fn new(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "node index must fit in u32");
        Self(index as u32)
    }

    /// Returns the arena position.
    #[inline]
    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a node came from in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum NodeKey {
    /// An object key, verbatim.
    Field(String),
    /// A 0-based array position.
    Index(usize),
}

impl NodeKey {
    /// The key text used for naming and metadata classification.
    pub fn as_text(&self) -> String {
        match self {
            Self::Field(key) => key.clone(),
            Self::Index(index) => index.to_string(),
        }
    }
}

/// The folder/file discriminant, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Folder,
    File,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

/// Node payload: a folder holds ordered children, a file holds its value.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Folder { children: ThinVec<NodeId> },
    File { value: Value },
}

/// Display metadata derived once at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub owner: String,
    pub source: String,
    pub latency: String,
    pub description: String,
}

/// One element of the browsable hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) key: NodeKey,
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) metadata: NodeMetadata,
}

impl TreeNode {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the parent node id, if any.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Folder { .. } => NodeType::Folder,
            NodeKind::File { .. } => NodeType::File,
        }
    }

    pub fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Child ids in document order; empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// The leaf value; `None` for folders.
    pub fn value(&self) -> Option<&Value> {
        match &self.kind {
            NodeKind::File { value } => Some(value),
            NodeKind::Folder { .. } => None,
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        if let NodeKind::Folder { children } = &mut self.kind {
            children.push(child);
        }
    }
}

/// Renders a leaf value the way search compares it: strings verbatim,
/// everything else as JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
