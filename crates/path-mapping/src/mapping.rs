//! Path mapping records and their validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MappingError, Result};
use crate::levels::{empty_levels, join_levels, split_levels, Levels, LEVEL_COUNT};

/// Unique identifier of a mapping record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingId(String);

impl MappingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MappingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MappingId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MappingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One override from a canonical path to a display path.
///
/// The display path is not stored separately: it is always the join of the
/// non-empty levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredMapping", into = "StoredMapping")]
pub struct PathMapping {
    id: MappingId,
    canonical_path: String,
    levels: Levels,
}

impl PathMapping {
    /// Creates a validated mapping.
    pub fn new(id: MappingId, canonical_path: impl Into<String>, levels: Levels) -> Result<Self> {
        let canonical_path = canonical_path.into();
        validate(&canonical_path, &levels)?;
        Ok(Self {
            id,
            canonical_path,
            levels,
        })
    }

    pub fn id(&self) -> &MappingId {
        &self.id
    }

    pub fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    /// The display path derived from the levels.
    pub fn display_path(&self) -> String {
        join_levels(&self.levels)
    }
}

/// Caller-supplied mapping, before validation.
///
/// When both `levels` and `display_path` are given, `levels` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingInput {
    #[serde(default)]
    pub id: Option<MappingId>,
    pub canonical_path: String,
    #[serde(default)]
    pub display_path: Option<String>,
    #[serde(default)]
    pub levels: Option<Vec<String>>,
}

impl MappingInput {
    pub fn with_display(
        canonical_path: impl Into<String>,
        display_path: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            canonical_path: canonical_path.into(),
            display_path: Some(display_path.into()),
            levels: None,
        }
    }

    pub fn with_levels<S: Into<String>>(
        canonical_path: impl Into<String>,
        levels: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id: None,
            canonical_path: canonical_path.into(),
            display_path: None,
            levels: Some(levels.into_iter().map(Into::into).collect()),
        }
    }

    pub fn with_id(mut self, id: impl Into<MappingId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Resolves the level slots this input describes.
    pub fn to_levels(&self) -> Result<Levels> {
        match (&self.levels, &self.display_path) {
            (Some(levels), _) => levels_from_slice(levels),
            (None, Some(display_path)) => Ok(split_levels(display_path)),
            (None, None) => Err(MappingError::InvalidMapping(
                "either displayPath or levels is required".to_string(),
            )),
        }
    }

    /// Validates the input into a record with the given id.
    pub fn into_mapping(self, id: MappingId) -> Result<PathMapping> {
        let levels = self.to_levels()?;
        PathMapping::new(id, self.canonical_path, levels)
    }
}

fn levels_from_slice(slots: &[String]) -> Result<Levels> {
    if slots.len() > LEVEL_COUNT {
        return Err(MappingError::InvalidMapping(format!(
            "at most {LEVEL_COUNT} levels are allowed, got {}",
            slots.len()
        )));
    }
    let mut levels = empty_levels();
    for (slot, value) in levels.iter_mut().zip(slots) {
        slot.clone_from(value);
    }
    Ok(levels)
}

fn validate(canonical_path: &str, levels: &Levels) -> Result<()> {
    if canonical_path.trim().is_empty() {
        return Err(MappingError::InvalidMapping(
            "canonical path must not be empty".to_string(),
        ));
    }
    if join_levels(levels).is_empty() {
        return Err(MappingError::InvalidMapping(format!(
            "display path for {canonical_path} must not be empty"
        )));
    }
    Ok(())
}

/// Serialized shape of a mapping. `displayPath` is written for consumers
/// that cache it and is only read when `levels` is absent.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMapping {
    id: MappingId,
    canonical_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    levels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_path: Option<String>,
}

impl TryFrom<StoredMapping> for PathMapping {
    type Error = MappingError;

    fn try_from(stored: StoredMapping) -> Result<Self> {
        let input = MappingInput {
            id: None,
            canonical_path: stored.canonical_path,
            display_path: stored.display_path,
            levels: stored.levels,
        };
        input.into_mapping(stored.id)
    }
}

impl From<PathMapping> for StoredMapping {
    fn from(mapping: PathMapping) -> Self {
        let display_path = mapping.display_path();
        Self {
            id: mapping.id,
            canonical_path: mapping.canonical_path,
            levels: Some(mapping.levels.to_vec()),
            display_path: Some(display_path),
        }
    }
}
