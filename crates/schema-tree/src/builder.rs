//! Document to forest construction.
//!
//! The builder walks the document once in pre-order, inserting each node into
//! the arena before its children so ids follow document order. Children are
//! linked to their parent as the recursion unwinds.

use serde_json::Value;
use thin_vec::ThinVec;

use crate::forest::Forest;
use crate::metadata::node_metadata;
use crate::naming::{format_name, item_name};
use crate::node::{NodeId, NodeKey, NodeKind, TreeNode};

/// Builds the forest for a document.
///
/// Objects yield one root per key and arrays one root per element. Any other
/// root value is not browsable and produces an empty forest.
pub fn build(data: &Value) -> Forest {
    let mut nodes = Vec::new();
    let roots = match data {
        Value::Object(_) | Value::Array(_) => build_children(None, data, &mut nodes),
        other => {
            log::warn!(
                "document root is {}, not an object or array; producing an empty forest",
                json_type_name(other)
            );
            Vec::new()
        }
    };
    log::debug!(
        "built forest with {} nodes, {} roots",
        nodes.len(),
        roots.len()
    );
    Forest::from_parts(nodes, roots)
}

fn build_children(
    parent: Option<NodeId>,
    container: &Value,
    nodes: &mut Vec<TreeNode>,
) -> Vec<NodeId> {
    match container {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                let name = format_name(key);
                build_node(parent, NodeKey::Field(key.clone()), name, value, nodes)
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| {
                build_node(parent, NodeKey::Index(index), item_name(index), value, nodes)
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn build_node(
    parent: Option<NodeId>,
    key: NodeKey,
    name: String,
    value: &Value,
    nodes: &mut Vec<TreeNode>,
) -> NodeId {
    let id = NodeId::new(nodes.len());
    let key_text = key.as_text();

    let (kind, metadata) = if is_container(value) {
        let metadata = node_metadata(&key_text, &name, None);
        (
            NodeKind::Folder {
                children: ThinVec::new(),
            },
            metadata,
        )
    } else {
        let metadata = node_metadata(&key_text, &name, Some(value));
        (
            NodeKind::File {
                value: value.clone(),
            },
            metadata,
        )
    };

    nodes.push(TreeNode {
        id,
        parent,
        key,
        name,
        kind,
        metadata,
    });

    if is_container(value) {
        let children = build_children(Some(id), value, nodes);
        let node = &mut nodes[id.get()];
        for child in children {
            node.push_child(child);
        }
    }

    id
}

#[inline]
fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;
    use serde_json::json;

    /// Follows display names from the roots, returning the node at the end.
    fn walk<'a>(forest: &'a Forest, names: &[&str]) -> Option<&'a TreeNode> {
        let mut level: Vec<&TreeNode> = forest.roots().collect();
        let mut found = None;
        for name in names {
            let node = *level.iter().find(|node| node.name() == *name)?;
            level = forest.children(node.id()).collect();
            found = Some(node);
        }
        found
    }

    #[test]
    fn scenario_object_with_array() {
        let forest = build(&json!({ "firstName": "John", "tags": ["a", "b"] }));
        let roots: Vec<_> = forest.roots().collect();
        assert_eq!(roots.len(), 2);

        assert_eq!(roots[0].name(), "First Name");
        assert_eq!(roots[0].node_type(), NodeType::File);
        assert_eq!(roots[0].value(), Some(&json!("John")));

        assert_eq!(roots[1].name(), "Tags");
        assert_eq!(roots[1].node_type(), NodeType::Folder);
        let items: Vec<_> = forest.children(roots[1].id()).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name(), "Item 1");
        assert_eq!(items[0].value(), Some(&json!("a")));
        assert_eq!(items[1].name(), "Item 2");
        assert_eq!(items[1].value(), Some(&json!("b")));
        assert!(items.iter().all(|item| item.is_file()));
    }

    #[test]
    fn non_container_roots_give_empty_forest() {
        for value in [json!(null), json!(3), json!("text"), json!(true)] {
            assert!(build(&value).is_empty());
        }
    }

    #[test]
    fn root_array_elements_become_items() {
        let forest = build(&json!([1, { "a": null }]));
        let roots: Vec<_> = forest.roots().collect();
        assert_eq!(roots[0].name(), "Item 1");
        assert!(roots[0].is_file());
        assert_eq!(roots[1].name(), "Item 2");
        assert!(roots[1].is_folder());
        let inner: Vec<_> = forest.children(roots[1].id()).collect();
        assert_eq!(inner[0].name(), "A");
        assert_eq!(inner[0].value(), Some(&Value::Null));
    }

    #[test]
    fn empty_containers_are_empty_folders() {
        let forest = build(&json!({ "settings": {}, "list": [] }));
        for root in forest.roots() {
            assert!(root.is_folder());
            assert!(root.children().is_empty());
        }
    }

    #[test]
    fn nested_arrays_recurse_positionally() {
        let forest = build(&json!({ "matrix": [[1, 2], [3]] }));
        let leaf = walk(&forest, &["Matrix", "Item 1", "Item 2"]).expect("leaf");
        assert_eq!(leaf.value(), Some(&json!(2)));
        let leaf = walk(&forest, &["Matrix", "Item 2", "Item 1"]).expect("leaf");
        assert_eq!(leaf.value(), Some(&json!(3)));
    }

    #[test]
    fn object_key_order_is_preserved() {
        let forest = build(&json!({ "zeta": 1, "alpha": 2, "mid": 3 }));
        let names: Vec<_> = forest.roots().map(|node| node.name().to_string()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn ids_follow_document_order() {
        let forest = build(&json!({ "a": { "b": 1, "c": 2 }, "d": 3 }));
        let names: Vec<_> = forest.iter().map(|node| node.name().to_string()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        for node in forest.iter() {
            for child in node.children() {
                assert_eq!(forest.node(*child).and_then(|c| c.parent()), Some(node.id()));
            }
        }
    }

    #[test]
    fn every_leaf_path_maps_to_one_file_node() {
        let doc = json!({
            "user": { "firstName": "Ada", "emails": ["a@x", "b@x"] },
            "flags": [true, null],
            "count": 3
        });
        let forest = build(&doc);
        let expected = [
            (vec!["User", "First Name"], json!("Ada")),
            (vec!["User", "Emails", "Item 1"], json!("a@x")),
            (vec!["User", "Emails", "Item 2"], json!("b@x")),
            (vec!["Flags", "Item 1"], json!(true)),
            (vec!["Flags", "Item 2"], json!(null)),
            (vec!["Count"], json!(3)),
        ];
        for (names, value) in &expected {
            let node = walk(&forest, names).expect("leaf present");
            assert!(node.is_file());
            assert_eq!(node.value(), Some(value));
        }
        let file_count = forest.iter().filter(|node| node.is_file()).count();
        assert_eq!(file_count, expected.len());
    }

    #[test]
    fn metadata_is_always_populated() {
        let forest = build(&json!({
            "userProfile": { "lastLoginTimestamp": "2024-01-01T00:00:00Z" }
        }));
        let folder = forest.roots().next().expect("root");
        assert_eq!(folder.metadata().owner, "User Management");
        assert_eq!(folder.metadata().latency, "N/A");
        let leaf = forest.children(folder.id()).next().expect("leaf");
        assert_eq!(leaf.metadata().source, "System Clock");
        assert_eq!(leaf.metadata().latency, "Real-time");
        assert_eq!(
            leaf.metadata().description,
            "Last Login Timestamp (Date/Time)"
        );
    }
}
