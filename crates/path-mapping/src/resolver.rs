//! Canonical to display path resolution.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::index::{Resolution, ResolverIndex};
use crate::mapping::PathMapping;

/// Resolves paths through the current override index.
///
/// Readers load the index lock-free; writers build a complete replacement and
/// swap it in, so a lookup always sees either the old or the new index in
/// full.
#[derive(Debug)]
pub struct PathResolver {
    index: ArcSwap<ResolverIndex>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(ResolverIndex::empty())
    }
}

impl PathResolver {
    pub fn new(index: ResolverIndex) -> Self {
        Self {
            index: ArcSwap::from_pointee(index),
        }
    }

    pub fn from_mappings<'a>(mappings: impl IntoIterator<Item = &'a PathMapping>) -> Self {
        Self::new(ResolverIndex::build(mappings))
    }

    /// Returns the display path for `canonical_path`.
    ///
    /// An exact override wins, then the longest segment-aligned prefix with
    /// the remainder appended verbatim. Paths with no applicable override come
    /// back unchanged; use [`PathResolver::lookup`] to detect that case.
    pub fn resolve(&self, canonical_path: &str) -> String {
        self.lookup(canonical_path).path
    }

    /// Like [`PathResolver::resolve`], reporting how the path matched.
    pub fn lookup(&self, canonical_path: &str) -> Resolution {
        self.index.load().lookup(canonical_path)
    }

    /// Returns the canonical path for `display_path`, or the input unchanged.
    pub fn reverse(&self, display_path: &str) -> String {
        self.reverse_lookup(display_path).path
    }

    pub fn reverse_lookup(&self, display_path: &str) -> Resolution {
        self.index.load().reverse_lookup(display_path)
    }

    /// The index currently in effect.
    pub fn snapshot(&self) -> Arc<ResolverIndex> {
        self.index.load_full()
    }

    /// Number of mappings in the current index.
    pub fn len(&self) -> usize {
        self.index.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn swap(&self, index: ResolverIndex) {
        self.index.store(Arc::new(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MatchKind;
    use crate::mapping::{MappingId, MappingInput};

    fn resolver(pairs: &[(&str, &str)]) -> PathResolver {
        let mappings: Vec<_> = pairs
            .iter()
            .map(|(canonical, display)| {
                MappingInput::with_display(*canonical, *display)
                    .into_mapping(MappingId::new(*canonical))
                    .expect("valid")
            })
            .collect();
        PathResolver::from_mappings(&mappings)
    }

    #[test]
    fn scenario_prefix_resolution() {
        let resolver = resolver(&[("user/name", "Profile/Name")]);
        assert_eq!(resolver.resolve("user/name/first"), "Profile/Name/first");
    }

    #[test]
    fn scenario_no_matching_prefix() {
        let resolver = resolver(&[("user/name", "Profile/Name")]);
        assert_eq!(resolver.resolve("billing/amount"), "billing/amount");
    }

    #[test]
    fn exact_match_law() {
        let resolver = resolver(&[("user", "People"), ("user/name", "Profile/Name")]);
        assert_eq!(resolver.resolve("user/name"), "Profile/Name");
        assert_eq!(resolver.resolve("user"), "People");
    }

    #[test]
    fn lookup_reports_unmapped() {
        let resolver = resolver(&[("user/name", "Profile/Name")]);
        assert_eq!(resolver.lookup("billing").kind, MatchKind::Unmapped);
        assert_eq!(resolver.lookup("user/name").kind, MatchKind::Exact);
    }

    #[test]
    fn swap_replaces_index_for_new_reads() {
        let resolver = resolver(&[("user/name", "Profile/Name")]);
        let before = resolver.snapshot();
        resolver.swap(ResolverIndex::empty());
        assert_eq!(resolver.resolve("user/name"), "user/name");
        // Readers holding the old snapshot keep a complete index.
        assert_eq!(before.lookup("user/name").path, "Profile/Name");
        assert!(resolver.is_empty());
    }

    #[test]
    fn reverse_resolution() {
        let resolver = resolver(&[("user/name", "Profile/Name")]);
        assert_eq!(resolver.reverse("Profile/Name/first"), "user/name/first");
        assert_eq!(resolver.reverse("Elsewhere"), "Elsewhere");
    }
}
