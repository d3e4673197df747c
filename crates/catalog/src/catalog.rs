//! Shared catalog state: the browsable document and the mapping store.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use path_mapping::MappingStore;
use schema_tree::{build, search_with_paths, Forest};
use serde_json::Value;

use crate::config::{load_or_create_catalog_config, CatalogConfig};
use crate::error::CatalogResult;
use crate::seed::default_mappings;
use crate::storage::JsonFileBackend;
use crate::view::{SearchResultView, TreeEntry, TreeNodeView};

/// State shared by every catalog consumer.
///
/// The forest is replaced whole on each load; readers keep whichever forest
/// they loaded until they drop it. All mapping reads and writes go through the
/// one [`MappingStore`].
pub struct Catalog {
    config: CatalogConfig,
    forest: ArcSwap<Forest>,
    mappings: MappingStore,
}

impl Catalog {
    pub fn new(config: CatalogConfig, mappings: MappingStore) -> CatalogResult<Self> {
        if config.seed_defaults {
            mappings.seed(default_mappings())?;
        }
        Ok(Self {
            config,
            forest: ArcSwap::from_pointee(Forest::empty()),
            mappings,
        })
    }

    /// Opens the catalog stored in `dir`, creating its config when missing.
    pub fn open(dir: &Path) -> CatalogResult<Self> {
        let config = load_or_create_catalog_config(dir)?;
        Self::open_with_config(dir, config)
    }

    pub fn open_with_config(dir: &Path, config: CatalogConfig) -> CatalogResult<Self> {
        let backend = JsonFileBackend::new(config.mappings_path(dir));
        let mappings = MappingStore::open(backend, config.event_capacity)?;
        tracing::info!(
            "opened catalog in {} with {} mappings",
            dir.display(),
            mappings.len()
        );
        Self::new(config, mappings)
    }

    /// A catalog whose mappings live only in memory.
    pub fn in_memory(config: CatalogConfig) -> CatalogResult<Self> {
        Self::new(config, MappingStore::in_memory())
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn mappings(&self) -> &MappingStore {
        &self.mappings
    }

    /// Builds a forest from `document` and makes it current.
    pub fn load_document(&self, document: &Value) -> Arc<Forest> {
        let forest = Arc::new(build(document));
        self.forest.store(Arc::clone(&forest));
        tracing::info!(
            "loaded document with {} nodes in {} roots",
            forest.len(),
            forest.root_ids().len()
        );
        forest
    }

    pub fn forest(&self) -> Arc<Forest> {
        self.forest.load_full()
    }

    pub fn tree(&self) -> Vec<TreeNodeView> {
        TreeNodeView::forest(&self.forest())
    }

    /// Children of the folder at `path`; the roots for an empty path.
    pub fn list(&self, path: &str) -> CatalogResult<Vec<TreeEntry>> {
        let forest = self.forest();
        let nodes = forest.list(path)?;
        Ok(nodes
            .into_iter()
            .map(|node| TreeEntry::new(&forest, node))
            .collect())
    }

    pub fn get(&self, path: &str) -> CatalogResult<TreeNodeView> {
        let forest = self.forest();
        let node = forest.get(path)?;
        Ok(forest.snapshot_node(node).into())
    }

    pub fn search(&self, query: &str) -> Vec<SearchResultView> {
        let forest = self.forest();
        search_with_paths(&forest, query, Some(self.config.max_search_results))
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("config", &self.config)
            .field("nodes", &self.forest.load().len())
            .field("mappings", &self.mappings)
            .finish()
    }
}
