//! File-backed mapping persistence.

use std::path::{Path, PathBuf};

use path_mapping::{
    decode_mappings, encode_mappings, MappingBackend, MappingError, MappingSnapshot,
};

/// Stores the mapping set as one JSON document.
///
/// Saves go through a sibling temp file and a rename so a crash mid-write
/// leaves the previous document intact. A missing file loads as `None`, so the
/// store can tell a fresh directory from a set that was emptied.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "mappings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl MappingBackend for JsonFileBackend {
    fn load(&self) -> path_mapping::Result<Option<MappingSnapshot>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(MappingError::Persistence(format!(
                    "failed to read mapping file {}: {error}",
                    self.path.display()
                )))
            }
        };
        decode_mappings(&bytes)
    }

    fn save(&self, snapshot: &MappingSnapshot) -> path_mapping::Result<()> {
        let encoded = encode_mappings(snapshot)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                MappingError::Persistence(format!(
                    "failed to create mapping directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, &encoded).map_err(|error| {
            MappingError::Persistence(format!(
                "failed to write mapping file {}: {error}",
                temp.display()
            ))
        })?;
        std::fs::rename(&temp, &self.path).map_err(|error| {
            MappingError::Persistence(format!(
                "failed to replace mapping file {}: {error}",
                self.path.display()
            ))
        })?;
        tracing::debug!(
            "saved {} mappings at revision {} to {}",
            snapshot.mappings.len(),
            snapshot.revision,
            self.path.display()
        );
        Ok(())
    }
}
