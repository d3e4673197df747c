use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, CatalogResult};

pub const CATALOG_CONFIG_FILENAME: &str = "catalog.json";
pub const CATALOG_CONFIG_VERSION: &str = "1.0.0";

/// Environment variable naming the data directory.
pub const CATALOG_DIR_ENV: &str = "CATALOG_DIR";
/// Environment variable overriding `bind_addr`.
pub const CATALOG_BIND_ENV: &str = "CATALOG_BIND";
pub const DEFAULT_CATALOG_DIR: &str = "./catalog-data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub version: String,
    pub bind_addr: String,
    /// Mapping file, relative to the data directory.
    pub mappings_file: String,
    pub event_capacity: usize,
    /// Insert the default mapping table when the store starts empty.
    pub seed_defaults: bool,
    pub max_search_results: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            version: CATALOG_CONFIG_VERSION.to_string(),
            bind_addr: "127.0.0.1:4850".to_string(),
            mappings_file: "mappings.json".to_string(),
            event_capacity: 64,
            seed_defaults: true,
            max_search_results: 500,
        }
    }
}

impl CatalogConfig {
    pub fn mappings_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.mappings_file)
    }

    /// Applies `CATALOG_BIND` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind) = std::env::var(CATALOG_BIND_ENV) {
            let bind = bind.trim();
            if !bind.is_empty() {
                self.bind_addr = bind.to_string();
            }
        }
        self
    }
}

/// Data directory from `CATALOG_DIR`, or the default.
pub fn catalog_dir_from_env() -> PathBuf {
    std::env::var_os(CATALOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_DIR))
}

pub fn load_or_create_catalog_config(dir: &Path) -> CatalogResult<CatalogConfig> {
    std::fs::create_dir_all(dir).map_err(|error| {
        CatalogError::Io(format!(
            "failed to create catalog directory {}: {error}",
            dir.display()
        ))
    })?;

    let path = catalog_config_path(dir);
    if !path.exists() {
        let config = CatalogConfig::default();
        write_catalog_config(&path, &config)?;
        tracing::info!("created catalog config at {}", path.display());
        return Ok(config);
    }

    let data = std::fs::read_to_string(&path).map_err(|error| {
        CatalogError::Io(format!(
            "failed to read catalog config {}: {error}",
            path.display()
        ))
    })?;
    let config: CatalogConfig = serde_json::from_str(&data).map_err(|error| {
        CatalogError::Config(format!(
            "failed to parse catalog config {}: {error}",
            path.display()
        ))
    })?;

    if config.version != CATALOG_CONFIG_VERSION {
        return Err(CatalogError::Config(format!(
            "unsupported catalog config version {} in {} (expected {CATALOG_CONFIG_VERSION})",
            config.version,
            path.display()
        )));
    }

    Ok(config)
}

pub fn catalog_config_path(dir: &Path) -> PathBuf {
    dir.join(CATALOG_CONFIG_FILENAME)
}

fn write_catalog_config(path: &Path, config: &CatalogConfig) -> CatalogResult<()> {
    let data = serde_json::to_string_pretty(config).map_err(|error| {
        CatalogError::Config(format!(
            "failed to serialize catalog config {}: {error}",
            path.display()
        ))
    })?;
    std::fs::write(path, data).map_err(|error| {
        CatalogError::Io(format!(
            "failed to write catalog config {}: {error}",
            path.display()
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_config_when_missing() {
        let dir = tempdir().expect("tempdir");
        let config = load_or_create_catalog_config(dir.path()).expect("load/create");

        assert!(catalog_config_path(dir.path()).exists());
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.bind_addr, "127.0.0.1:4850");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("nested").join("data");
        load_or_create_catalog_config(&nested).expect("load/create");
        assert!(catalog_config_path(&nested).exists());
    }

    #[test]
    fn loads_existing_config() {
        let dir = tempdir().expect("tempdir");
        let original = CatalogConfig {
            max_search_results: 25,
            seed_defaults: false,
            ..CatalogConfig::default()
        };
        write_catalog_config(&catalog_config_path(dir.path()), &original).expect("write");

        let loaded = load_or_create_catalog_config(dir.path()).expect("load");
        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(
            catalog_config_path(dir.path()),
            r#"{ "version": "1.0.0", "event_capacity": 8 }"#,
        )
        .expect("write");

        let loaded = load_or_create_catalog_config(dir.path()).expect("load");
        assert_eq!(loaded.event_capacity, 8);
        assert_eq!(loaded.mappings_file, "mappings.json");
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let mut original = CatalogConfig::default();
        original.version = "0.9.0".to_string();
        write_catalog_config(&catalog_config_path(dir.path()), &original).expect("write");

        let err = load_or_create_catalog_config(dir.path()).expect_err("expected error");
        match err {
            CatalogError::Config(message) => assert!(message.contains("0.9.0")),
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(catalog_config_path(dir.path()), "{ nope").expect("write");
        let err = load_or_create_catalog_config(dir.path()).expect_err("expected error");
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn mappings_path_is_relative_to_dir() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.mappings_path(Path::new("/data")),
            Path::new("/data/mappings.json")
        );
    }
}
