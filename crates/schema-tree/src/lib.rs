//! Document tree building, browsing, and search.
//!
//! This crate turns an arbitrary nested JSON document into a browsable
//! forest of named nodes:
//! - Arena-backed forest with stable node ids and parent links
//! - Display-name derivation and rule-table metadata classification
//! - Path-based browsing (`list` / `get`) with a distinct not-found error
//! - Case-insensitive substring search with identity-based path reconstruction

pub mod builder;
pub mod error;
pub mod forest;
pub mod metadata;
pub mod naming;
pub mod node;
pub mod node_view;
pub mod search;

// Re-export main types
pub use builder::build;
pub use error::{Result, TreeError};
pub use forest::{Forest, NodeSnapshot};
pub use metadata::{classify, MetadataField, MetadataRule, METADATA_RULES};
pub use naming::format_name;
pub use node::{NodeId, NodeKey, NodeKind, NodeMetadata, NodeType, TreeNode};
pub use node_view::{depth_of, path_to};
pub use search::{search, search_with_paths, SearchHit};
