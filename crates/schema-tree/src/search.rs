//! Substring search over a forest.
//!
//! Matching is a single pre-order pass in document order. A node matches when
//! its display name contains the query, or when it is a file whose value text
//! contains the query; both comparisons ignore case. Folder matches do not
//! hide matches further down the same subtree.

use serde::Serialize;

use crate::forest::Forest;
use crate::node::{value_text, NodeId, NodeType, TreeNode};
use crate::node_view::path_to;

/// A search match with its reconstructed display path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub node: NodeId,
    pub name: String,
    pub kind: NodeType,
    pub path: Vec<String>,
}

/// Returns every matching node in document order.
///
/// An empty or whitespace-only query matches nothing.
pub fn search<'a>(forest: &'a Forest, query: &str) -> Vec<&'a TreeNode> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    let mut stack: Vec<NodeId> = forest.root_ids().iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        let Some(node) = forest.node(id) else {
            continue;
        };
        if node_matches(node, &needle) {
            matches.push(node);
        }
        stack.extend(node.children().iter().rev().copied());
    }

    matches
}

/// Like [`search`], pairing each match with its path and truncating to
/// `limit` when given.
pub fn search_with_paths(forest: &Forest, query: &str, limit: Option<usize>) -> Vec<SearchHit> {
    search(forest, query)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .filter_map(|node| {
            let path = path_to(forest, node.id())?;
            Some(SearchHit {
                node: node.id(),
                name: node.name().to_string(),
                kind: node.node_type(),
                path,
            })
        })
        .collect()
}

fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

fn node_matches(node: &TreeNode, needle: &str) -> bool {
    if node.name().to_lowercase().contains(needle) {
        return true;
    }
    node.value()
        .is_some_and(|value| value_text(value).to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use serde_json::json;

    fn names(nodes: &[&TreeNode]) -> Vec<String> {
        nodes.iter().map(|node| node.name().to_string()).collect()
    }

    #[test]
    fn empty_query_returns_nothing() {
        let forest = build(&json!({ "a": 1 }));
        assert!(search(&forest, "").is_empty());
        assert!(search(&forest, "   \t").is_empty());
    }

    #[test]
    fn matches_names_case_insensitively() {
        let forest = build(&json!({ "firstName": "John", "lastName": "Doe", "age": 3 }));
        assert_eq!(names(&search(&forest, "NAME")), vec!["First Name", "Last Name"]);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_query() {
        let forest = build(&json!({ "firstName": "x", "namespace": "y" }));
        assert_eq!(names(&search(&forest, " name")), vec!["First Name"]);
        assert_eq!(names(&search(&forest, "first ")), vec!["First Name"]);
    }

    #[test]
    fn matches_file_values() {
        let forest = build(&json!({ "city": "Oslo", "zip": 1234, "ok": true }));
        assert_eq!(names(&search(&forest, "osl")), vec!["City"]);
        assert_eq!(names(&search(&forest, "23")), vec!["Zip"]);
        assert_eq!(names(&search(&forest, "true")), vec!["Ok"]);
    }

    #[test]
    fn folder_match_does_not_hide_descendants() {
        let forest = build(&json!({ "user": { "userName": "x", "other": { "user": 1 } } }));
        assert_eq!(
            names(&search(&forest, "user")),
            vec!["User", "User Name", "User"]
        );
    }

    #[test]
    fn results_follow_document_order_and_are_stable() {
        let forest = build(&json!({
            "b": { "tag": "x" },
            "a": ["tag", { "tag": "y" }],
            "tag": 0
        }));
        let first = search(&forest, "tag");
        let second = search(&forest, "tag");
        assert_eq!(first, second);
        let ids: Vec<_> = first.iter().map(|node| node.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn hits_carry_identity_paths() {
        let forest = build(&json!({
            "billing": { "name": "Acme" },
            "shipping": { "name": "Acme" }
        }));
        let hits = search_with_paths(&forest, "acme", None);
        let paths: Vec<_> = hits.iter().map(|hit| hit.path.join("/")).collect();
        assert_eq!(paths, vec!["Billing/Name", "Shipping/Name"]);
        assert!(hits.iter().all(|hit| hit.kind == NodeType::File));
    }

    #[test]
    fn limit_truncates_hits() {
        let forest = build(&json!(["a1", "a2", "a3"]));
        assert_eq!(search_with_paths(&forest, "a", Some(2)).len(), 2);
    }
}
