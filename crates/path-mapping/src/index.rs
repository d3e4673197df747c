//! Immutable prefix index over the mapping set.
//!
//! Mapping keys are stored in a trie keyed by `/`-separated segments. A lookup
//! walks the query's segments from the root and remembers the deepest node
//! that carries a target, which is the override key with the greatest
//! segment length among all segment-aligned prefixes of the query. Two
//! distinct keys with the same segment count cannot both be prefixes of one
//! path, so no further tie-break is needed.
//!
//! The index is built in one pass and never mutated; the resolver swaps whole
//! indexes.

use std::collections::HashMap;

use serde::Serialize;

use crate::levels::SEPARATOR;
use crate::mapping::PathMapping;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<String, TrieNode>,
    target: Option<String>,
}

impl TrieNode {
    /// Inserts `key -> target`, keeping an existing target when `replace` is
    /// false. Returns whether the target was written.
    fn insert(&mut self, key: &str, target: &str, replace: bool) -> bool {
        let mut node = self;
        for segment in key.split(SEPARATOR) {
            node = node.children.entry(segment.to_string()).or_default();
        }
        if node.target.is_some() && !replace {
            return false;
        }
        node.target = Some(target.to_string());
        true
    }

    fn longest_match(&self, path: &str) -> Option<PrefixMatch<'_>> {
        let segment_count = path.split(SEPARATOR).count();
        let mut node = self;
        let mut consumed = 0usize;
        let mut best = None;

        for (depth, segment) in path.split(SEPARATOR).enumerate() {
            match node.children.get(segment) {
                Some(next) => node = next,
                None => break,
            }
            if depth > 0 {
                consumed += SEPARATOR.len_utf8();
            }
            consumed += segment.len();
            if let Some(target) = node.target.as_deref() {
                best = Some(PrefixMatch {
                    key_len: consumed,
                    target,
                    exact: depth + 1 == segment_count,
                });
            }
        }

        best
    }
}

#[derive(Debug, Clone, Copy)]
struct PrefixMatch<'a> {
    key_len: usize,
    target: &'a str,
    exact: bool,
}

/// How a path was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The whole path is an override key.
    Exact,
    /// A shorter override key matched and the rest of the path was appended.
    Prefix,
    /// No override key applies; the path is returned unchanged.
    Unmapped,
}

/// Outcome of a lookup, for callers that need to know whether a mapping
/// actually applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub path: String,
    pub kind: MatchKind,
    /// The override key that matched, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_key: Option<String>,
}

impl Resolution {
    pub fn is_mapped(&self) -> bool {
        self.kind != MatchKind::Unmapped
    }
}

/// Forward (canonical to display) and reverse (display to canonical) tries.
#[derive(Debug, Default)]
pub struct ResolverIndex {
    forward: TrieNode,
    reverse: TrieNode,
    len: usize,
}

impl ResolverIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an index from a mapping set.
    ///
    /// When several canonical paths share a display path, the reverse
    /// direction keeps the lexicographically smallest canonical path.
    pub fn build<'a>(mappings: impl IntoIterator<Item = &'a PathMapping>) -> Self {
        let mut sorted: Vec<&PathMapping> = mappings.into_iter().collect();
        sorted.sort_by(|a, b| a.canonical_path().cmp(b.canonical_path()));

        let mut index = Self::empty();
        for mapping in sorted {
            let display_path = mapping.display_path();
            index
                .forward
                .insert(mapping.canonical_path(), &display_path, true);
            index
                .reverse
                .insert(&display_path, mapping.canonical_path(), false);
            index.len += 1;
        }
        index
    }

    /// Number of mappings indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolves a canonical path to its display path.
    pub fn lookup(&self, canonical_path: &str) -> Resolution {
        resolve_in(&self.forward, canonical_path)
    }

    /// Resolves a display path back to its canonical path.
    pub fn reverse_lookup(&self, display_path: &str) -> Resolution {
        resolve_in(&self.reverse, display_path)
    }
}

fn resolve_in(trie: &TrieNode, path: &str) -> Resolution {
    match trie.longest_match(path) {
        Some(found) => {
            let (key, suffix) = path.split_at(found.key_len);
            Resolution {
                path: format!("{}{suffix}", found.target),
                kind: if found.exact {
                    MatchKind::Exact
                } else {
                    MatchKind::Prefix
                },
                matched_key: Some(key.to_string()),
            }
        }
        None => Resolution {
            path: path.to_string(),
            kind: MatchKind::Unmapped,
            matched_key: None,
        },
    }
}
