//! Default override table applied to an empty mapping store.

use path_mapping::MappingInput;

const DEFAULT_MAPPINGS: &[(&str, &[&str])] = &[
    ("user", &["People"]),
    ("user/name", &["People", "Profile", "Name"]),
    ("user/email", &["People", "Contact", "Email"]),
    ("user/phone", &["People", "Contact", "Phone"]),
    ("user/address", &["People", "Location", "Address"]),
    ("user/preferences", &["People", "Profile", "Preferences"]),
    ("billing", &["Finance", "Billing"]),
    ("payment", &["Finance", "Payments"]),
    ("payment/method", &["Finance", "Payments", "Method"]),
    ("analytics", &["Insights", "Analytics"]),
    ("metrics", &["Insights", "Metrics"]),
    ("device", &["Technology", "Device"]),
    ("session", &["Technology", "Session"]),
];

/// The built-in mapping table, one input per canonical path.
pub fn default_mappings() -> Vec<MappingInput> {
    DEFAULT_MAPPINGS
        .iter()
        .map(|(canonical, levels)| MappingInput::with_levels(*canonical, levels.iter().copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_mapping::MappingStore;
    use std::collections::HashSet;

    #[test]
    fn canonical_paths_are_unique() {
        let mut seen = HashSet::new();
        for input in default_mappings() {
            assert!(seen.insert(input.canonical_path.clone()), "{}", input.canonical_path);
        }
    }

    #[test]
    fn every_default_is_valid() {
        let store = MappingStore::in_memory();
        let count = store.seed(default_mappings()).expect("seed");
        assert_eq!(count, DEFAULT_MAPPINGS.len());
    }

    #[test]
    fn defaults_resolve_nested_paths() {
        let store = MappingStore::in_memory();
        store.seed(default_mappings()).expect("seed");
        assert_eq!(store.resolve("user/name/first"), "People/Profile/Name/first");
        assert_eq!(store.resolve("user/createdAt"), "People/createdAt");
        assert_eq!(store.resolve("inventory/sku"), "inventory/sku");
    }
}
