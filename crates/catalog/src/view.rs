//! JSON shapes handed to browsing and editor clients.

use path_mapping::{MappingChange, MatchKind, PathMapping, Resolution};
use schema_tree::{depth_of, path_to, Forest, NodeMetadata, NodeSnapshot, SearchHit, TreeNode};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NodeMetadataView {
    pub owner: String,
    pub source: String,
    pub latency: String,
    pub description: String,
}

impl From<NodeMetadata> for NodeMetadataView {
    fn from(metadata: NodeMetadata) -> Self {
        Self {
            owner: metadata.owner,
            source: metadata.source,
            latency: metadata.latency,
            description: metadata.description,
        }
    }
}

/// A node with its whole subtree.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreeNodeView {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<serde_json::Value>,
    pub metadata: NodeMetadataView,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub children: Option<Vec<TreeNodeView>>,
}

impl From<NodeSnapshot> for TreeNodeView {
    fn from(snapshot: NodeSnapshot) -> Self {
        Self {
            id: snapshot.id.get(),
            name: snapshot.name,
            node_type: snapshot.kind.as_str().to_string(),
            value: snapshot.value,
            metadata: snapshot.metadata.into(),
            children: snapshot
                .children
                .map(|children| children.into_iter().map(Into::into).collect()),
        }
    }
}

impl TreeNodeView {
    /// Every root of `forest` with its subtree.
    pub fn forest(forest: &Forest) -> Vec<Self> {
        forest.snapshot().into_iter().map(Into::into).collect()
    }
}

/// One listed node, without its subtree.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreeEntry {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub path: Vec<String>,
    /// 0 for a root.
    pub depth: usize,
    pub child_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<serde_json::Value>,
    pub metadata: NodeMetadataView,
}

impl TreeEntry {
    pub fn new(forest: &Forest, node: &TreeNode) -> Self {
        Self {
            id: node.id().get(),
            name: node.name().to_string(),
            node_type: node.node_type().as_str().to_string(),
            path: path_to(forest, node.id()).unwrap_or_default(),
            depth: depth_of(forest, node.id()).unwrap_or_default(),
            child_count: node.children().len(),
            value: node.value().cloned(),
            metadata: node.metadata().clone().into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultView {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub path: Vec<String>,
}

impl From<SearchHit> for SearchResultView {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.node.get(),
            name: hit.name,
            node_type: hit.kind.as_str().to_string(),
            path: hit.path,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingView {
    pub id: String,
    pub canonical_path: String,
    pub display_path: String,
    pub levels: Vec<String>,
}

impl From<&PathMapping> for MappingView {
    fn from(mapping: &PathMapping) -> Self {
        Self {
            id: mapping.id().to_string(),
            canonical_path: mapping.canonical_path().to_string(),
            display_path: mapping.display_path(),
            levels: mapping.levels().to_vec(),
        }
    }
}

impl From<PathMapping> for MappingView {
    fn from(mapping: PathMapping) -> Self {
        Self::from(&mapping)
    }
}

/// Outcome of resolving a path in either direction.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionView {
    pub canonical_path: String,
    pub display_path: String,
    /// `exact`, `prefix` or `unmapped`.
    pub matched: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_key: Option<String>,
}

impl ResolutionView {
    pub fn forward(canonical_path: &str, resolution: Resolution) -> Self {
        Self {
            canonical_path: canonical_path.to_string(),
            display_path: resolution.path,
            matched: match_label(resolution.kind).to_string(),
            matched_key: resolution.matched_key,
        }
    }

    pub fn reverse(display_path: &str, resolution: Resolution) -> Self {
        Self {
            canonical_path: resolution.path,
            display_path: display_path.to_string(),
            matched: match_label(resolution.kind).to_string(),
            matched_key: resolution.matched_key,
        }
    }
}

fn match_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Exact => "exact",
        MatchKind::Prefix => "prefix",
        MatchKind::Unmapped => "unmapped",
    }
}

/// Payload of a `mapping.changed` event.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingChangeView {
    pub revision: u64,
    /// `upserted` or `deleted`.
    pub kind: String,
    pub id: String,
    pub canonical_path: String,
    pub display_path: String,
}

impl From<MappingChange> for MappingChangeView {
    fn from(change: MappingChange) -> Self {
        let kind = match change.kind {
            path_mapping::ChangeKind::Upserted => "upserted",
            path_mapping::ChangeKind::Deleted => "deleted",
        };
        Self {
            revision: change.revision,
            kind: kind.to_string(),
            id: change.id.to_string(),
            canonical_path: change.canonical_path,
            display_path: change.display_path,
        }
    }
}
