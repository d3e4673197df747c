//! Keyword-based metadata classification.
//!
//! Each node's owner, source and latency come from [`METADATA_RULES`], an
//! ordered table evaluated independently per field: the first rule whose
//! field, scope and matcher all fit wins, and the field falls back to its
//! default when nothing matches. Keys are matched lowercased, so the table
//! only needs lowercase keywords.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::node::NodeMetadata;

/// The metadata field a rule assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Owner,
    Source,
    Latency,
}

/// Which nodes a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    Any,
    LeafOnly,
}

/// How a rule recognises a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatcher {
    /// The lowercased key contains any of the keywords.
    Contains(&'static [&'static str]),
    /// The key names an identifier: `id`, `*_id`, `*-id`, `*Id`, `*ID`.
    IdNamed,
}

impl KeyMatcher {
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Contains(keywords) => {
                let lower = key.to_lowercase();
                keywords.iter().any(|keyword| lower.contains(keyword))
            }
            Self::IdNamed => is_id_named(key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataRule {
    pub matcher: KeyMatcher,
    pub field: MetadataField,
    pub scope: RuleScope,
    pub value: &'static str,
}

const fn rule(
    matcher: KeyMatcher,
    field: MetadataField,
    scope: RuleScope,
    value: &'static str,
) -> MetadataRule {
    MetadataRule {
        matcher,
        field,
        scope,
        value,
    }
}

use self::KeyMatcher::{Contains, IdNamed};
use self::MetadataField::{Latency, Owner, Source};
use self::RuleScope::{Any, LeafOnly};

/// Ordered classification rules. Order matters within a field only.
pub const METADATA_RULES: &[MetadataRule] = &[
    rule(Contains(&["user", "profile"]), Owner, Any, "User Management"),
    rule(Contains(&["payment", "billing"]), Owner, Any, "Finance Team"),
    rule(Contains(&["analytics", "metrics"]), Owner, Any, "Analytics Team"),
    rule(Contains(&["timestamp", "date"]), Source, Any, "System Clock"),
    rule(Contains(&["location", "address"]), Source, Any, "Location Service"),
    rule(Contains(&["user", "profile"]), Source, Any, "User Profile Service"),
    rule(IdNamed, Source, LeafOnly, "ID Generator"),
    rule(Contains(&["timestamp", "status"]), Latency, LeafOnly, "Real-time"),
    rule(Contains(&["cache", "temp"]), Latency, LeafOnly, "5 minutes"),
    rule(Contains(&["analytics", "metrics"]), Latency, LeafOnly, "1 hour"),
];

pub const FOLDER_OWNER: &str = "System Admin";
pub const LEAF_OWNER: &str = "Data Team";
pub const DEFAULT_SOURCE: &str = "System";
pub const FOLDER_LATENCY: &str = "N/A";
pub const LEAF_LATENCY: &str = "On-demand";

/// Leaf type annotation used in descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafType {
    Text,
    Number,
    YesNo,
    DateTime,
    Optional,
}

impl LeafType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Optional,
            Value::Bool(_) => Self::YesNo,
            Value::Number(_) => Self::Number,
            Value::String(text) if looks_like_date(text) => Self::DateTime,
            _ => Self::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::YesNo => "Yes/No",
            Self::DateTime => "Date/Time",
            Self::Optional => "Optional",
        }
    }
}

/// Returns the value of the first rule for `field` that applies to `key`.
pub fn classify(key: &str, field: MetadataField, is_leaf: bool) -> Option<&'static str> {
    METADATA_RULES
        .iter()
        .filter(|rule| rule.field == field)
        .filter(|rule| is_leaf || rule.scope == RuleScope::Any)
        .find(|rule| rule.matcher.matches(key))
        .map(|rule| rule.value)
}

/// Computes the full metadata for a node.
///
/// `leaf` carries the value for file nodes and is `None` for folders.
pub fn node_metadata(key: &str, display_name: &str, leaf: Option<&Value>) -> NodeMetadata {
    let is_leaf = leaf.is_some();
    let owner = classify(key, Owner, is_leaf)
        .unwrap_or(if is_leaf { LEAF_OWNER } else { FOLDER_OWNER });
    let source = classify(key, Source, is_leaf).unwrap_or(DEFAULT_SOURCE);
    let latency = if is_leaf {
        classify(key, Latency, true).unwrap_or(LEAF_LATENCY)
    } else {
        FOLDER_LATENCY
    };
    let description = match leaf {
        Some(value) => format!("{display_name} ({})", LeafType::of(value).label()),
        None => display_name.to_string(),
    };

    NodeMetadata {
        owner: owner.to_string(),
        source: source.to_string(),
        latency: latency.to_string(),
        description,
    }
}

fn is_id_named(key: &str) -> bool {
    let lower = key.to_lowercase();
    lower == "id"
        || lower.ends_with("_id")
        || lower.ends_with("-id")
        || (key.len() > 2 && key.ends_with("Id"))
        || ends_with_camel_id(key)
}

/// `userID` style: an all-caps `ID` suffix directly after a lowercase letter
/// or digit, so `ANDROID` and `PAID` do not count.
fn ends_with_camel_id(key: &str) -> bool {
    key.strip_suffix("ID")
        .and_then(|stem| stem.chars().next_back())
        .is_some_and(|before| before.is_lowercase() || before.is_ascii_digit())
}

fn looks_like_date(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn folder_defaults() {
        let meta = node_metadata("settings", "Settings", None);
        assert_eq!(meta.owner, FOLDER_OWNER);
        assert_eq!(meta.source, DEFAULT_SOURCE);
        assert_eq!(meta.latency, FOLDER_LATENCY);
        assert_eq!(meta.description, "Settings");
    }

    #[test]
    fn leaf_defaults() {
        let meta = node_metadata("color", "Color", Some(&json!("red")));
        assert_eq!(meta.owner, LEAF_OWNER);
        assert_eq!(meta.source, DEFAULT_SOURCE);
        assert_eq!(meta.latency, LEAF_LATENCY);
        assert_eq!(meta.description, "Color (Text)");
    }

    #[test]
    fn owner_rules_apply_in_order() {
        assert_eq!(classify("userProfile", Owner, true), Some("User Management"));
        assert_eq!(classify("billingCycle", Owner, false), Some("Finance Team"));
        assert_eq!(classify("pageMetrics", Owner, true), Some("Analytics Team"));
        // "user" is listed before "payment"
        assert_eq!(classify("userPayment", Owner, true), Some("User Management"));
    }

    #[test]
    fn source_rules() {
        assert_eq!(classify("createdDate", Source, true), Some("System Clock"));
        assert_eq!(classify("homeAddress", Source, true), Some("Location Service"));
        assert_eq!(classify("profile", Source, false), Some("User Profile Service"));
        assert_eq!(classify("orderId", Source, true), Some("ID Generator"));
        assert_eq!(classify("order_id", Source, true), Some("ID Generator"));
        assert_eq!(classify("id", Source, true), Some("ID Generator"));
    }

    #[test]
    fn id_rule_is_leaf_only_and_name_based() {
        assert_eq!(classify("orderId", Source, false), None);
        assert_eq!(classify("valid", Source, true), None);
        assert_eq!(classify("paid", Source, true), None);
    }

    #[test]
    fn all_caps_words_ending_in_id_are_not_ids() {
        assert_eq!(classify("ANDROID", Source, true), None);
        assert_eq!(classify("VOID", Source, true), None);
        assert_eq!(classify("PAID", Source, true), None);
        assert_eq!(classify("orderID", Source, true), Some("ID Generator"));
        assert_eq!(classify("sku2ID", Source, true), Some("ID Generator"));
    }

    #[test]
    fn earlier_source_rule_wins_over_id() {
        assert_eq!(classify("userId", Source, true), Some("User Profile Service"));
    }

    #[test]
    fn latency_is_leaf_only() {
        assert_eq!(node_metadata("status", "Status", None).latency, FOLDER_LATENCY);
        assert_eq!(
            node_metadata("status", "Status", Some(&json!("ok"))).latency,
            "Real-time"
        );
        assert_eq!(
            node_metadata("tempFile", "Temp File", Some(&json!("x"))).latency,
            "5 minutes"
        );
        assert_eq!(
            node_metadata("analyticsScore", "Analytics Score", Some(&json!(3))).latency,
            "1 hour"
        );
    }

    #[test]
    fn leaf_type_annotations() {
        assert_eq!(LeafType::of(&json!(null)), LeafType::Optional);
        assert_eq!(LeafType::of(&json!(false)), LeafType::YesNo);
        assert_eq!(LeafType::of(&json!(1.5)), LeafType::Number);
        assert_eq!(LeafType::of(&json!("2024-01-31")), LeafType::DateTime);
        assert_eq!(
            LeafType::of(&json!("2024-01-31T10:00:00Z")),
            LeafType::DateTime
        );
        assert_eq!(LeafType::of(&json!("tomorrow")), LeafType::Text);
        assert_eq!(
            node_metadata("active", "Active", Some(&json!(true))).description,
            "Active (Yes/No)"
        );
    }

    #[test]
    fn classification_ignores_value() {
        let a = node_metadata("userName", "User Name", Some(&json!("a")));
        let b = node_metadata("userName", "User Name", Some(&json!("b")));
        assert_eq!(a.owner, b.owner);
        assert_eq!(a.source, b.source);
        assert_eq!(a.latency, b.latency);
    }
}
