//! The mapping set, its resolver, and change notification.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::backend::{MappingBackend, MappingSnapshot, MemoryBackend};
use crate::error::{MappingError, Result};
use crate::event::{ChangeBus, ChangeKind, MappingChange};
use crate::index::ResolverIndex;
use crate::mapping::{MappingId, MappingInput, PathMapping};
use crate::resolver::PathResolver;

/// Default buffer for change subscribers.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct StoreState {
    records: BTreeMap<MappingId, PathMapping>,
    revision: u64,
    /// Set once the backend holds a document, loaded or written.
    persisted: bool,
}

impl StoreState {
    fn id_for_canonical(&self, canonical_path: &str) -> Option<&MappingId> {
        self.records
            .values()
            .find(|mapping| mapping.canonical_path() == canonical_path)
            .map(PathMapping::id)
    }

    fn sorted(&self) -> Vec<PathMapping> {
        let mut mappings: Vec<_> = self.records.values().cloned().collect();
        mappings.sort_by(|a, b| a.canonical_path().cmp(b.canonical_path()));
        mappings
    }
}

/// Single source of truth for path mappings.
///
/// Every mutation runs under one writer lock: the next record set and index
/// are built off to the side, persisted, and only then swapped in. Readers of
/// [`MappingStore::resolver`] never block on writers.
pub struct MappingStore {
    state: Mutex<StoreState>,
    resolver: Arc<PathResolver>,
    backend: Box<dyn MappingBackend>,
    bus: ChangeBus,
}

impl MappingStore {
    /// Loads the persisted set and revision and builds the first index.
    pub fn open(backend: impl MappingBackend + 'static, event_capacity: usize) -> Result<Self> {
        let loaded = backend.load()?;
        let persisted = loaded.is_some();
        let MappingSnapshot {
            revision,
            mappings: loaded,
        } = loaded.unwrap_or_default();
        let mut records: BTreeMap<MappingId, PathMapping> = BTreeMap::new();
        for mapping in loaded {
            if let Some(owner) = records
                .values()
                .find(|existing| existing.canonical_path() == mapping.canonical_path())
            {
                return Err(MappingError::DuplicateCanonicalPath(format!(
                    "{} (ids {} and {})",
                    mapping.canonical_path(),
                    owner.id(),
                    mapping.id()
                )));
            }
            let id = mapping.id().clone();
            if records.insert(id.clone(), mapping).is_some() {
                return Err(MappingError::DuplicateId(id));
            }
        }

        let resolver = PathResolver::from_mappings(records.values());
        log::debug!(
            "opened mapping store with {} mappings at revision {revision}",
            records.len()
        );

        Ok(Self {
            state: Mutex::new(StoreState {
                records,
                revision,
                persisted,
            }),
            resolver: Arc::new(resolver),
            backend: Box::new(backend),
            bus: ChangeBus::new(event_capacity),
        })
    }

    /// An empty store backed by memory.
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            resolver: Arc::new(PathResolver::default()),
            backend: Box::new(MemoryBackend::new()),
            bus: ChangeBus::new(DEFAULT_EVENT_CAPACITY),
        }
    }

    /// All mappings, ordered by canonical path.
    pub fn list(&self) -> Vec<PathMapping> {
        self.state.lock().sorted()
    }

    /// The revision and the mappings it covers, read together.
    pub fn snapshot(&self) -> MappingSnapshot {
        let state = self.state.lock();
        MappingSnapshot::new(state.revision, state.sorted())
    }

    pub fn get(&self, id: &MappingId) -> Result<PathMapping> {
        self.state
            .lock()
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| MappingError::MappingNotFound(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a new mapping. The canonical path and id (when given) must
    /// not already be in use.
    pub fn add(&self, input: MappingInput) -> Result<PathMapping> {
        let mut state = self.state.lock();
        self.insert_locked(&mut state, input)
    }

    /// Replaces the mapping named by `input.id`.
    pub fn update(&self, input: MappingInput) -> Result<PathMapping> {
        let mut state = self.state.lock();
        let id = input
            .id
            .clone()
            .ok_or_else(|| MappingError::InvalidMapping("id is required for update".to_string()))?;
        self.replace_locked(&mut state, id, input)
    }

    /// Updates by id, then by canonical path, otherwise inserts.
    pub fn add_or_update(&self, input: MappingInput) -> Result<PathMapping> {
        let mut state = self.state.lock();
        if let Some(id) = input.id.clone() {
            if state.records.contains_key(&id) {
                return self.replace_locked(&mut state, id, input);
            }
        }
        if let Some(id) = state.id_for_canonical(&input.canonical_path).cloned() {
            return self.replace_locked(&mut state, id, input);
        }
        self.insert_locked(&mut state, input)
    }

    pub fn delete(&self, id: &MappingId) -> Result<PathMapping> {
        let mut state = self.state.lock();
        let mut next = state.records.clone();
        let removed = next
            .remove(id)
            .ok_or_else(|| MappingError::MappingNotFound(id.clone()))?;
        self.commit(&mut state, next, ChangeKind::Deleted, &removed)?;
        Ok(removed)
    }

    /// Adds `inputs` only when the backend has never held a document, so a
    /// set emptied by deletes stays empty. Returns how many were inserted.
    pub fn seed(&self, inputs: impl IntoIterator<Item = MappingInput>) -> Result<usize> {
        let mut state = self.state.lock();
        if state.persisted {
            return Ok(0);
        }
        let mut count = 0;
        for input in inputs {
            self.insert_locked(&mut state, input)?;
            count += 1;
        }
        log::info!("seeded {count} default mappings");
        Ok(count)
    }

    /// The resolver reading this store's current index.
    pub fn resolver(&self) -> Arc<PathResolver> {
        Arc::clone(&self.resolver)
    }

    pub fn resolve(&self, canonical_path: &str) -> String {
        self.resolver.resolve(canonical_path)
    }

    /// Incremented once per successful mutation and restored on open.
    pub fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MappingChange> {
        self.bus.subscribe()
    }

    fn insert_locked(&self, state: &mut StoreState, input: MappingInput) -> Result<PathMapping> {
        let id = input.id.clone().unwrap_or_else(MappingId::generate);
        if state.records.contains_key(&id) {
            return Err(MappingError::DuplicateId(id));
        }
        let mapping = input.into_mapping(id)?;
        if state.id_for_canonical(mapping.canonical_path()).is_some() {
            return Err(MappingError::DuplicateCanonicalPath(
                mapping.canonical_path().to_string(),
            ));
        }

        let mut next = state.records.clone();
        next.insert(mapping.id().clone(), mapping.clone());
        self.commit(state, next, ChangeKind::Upserted, &mapping)?;
        Ok(mapping)
    }

    fn replace_locked(
        &self,
        state: &mut StoreState,
        id: MappingId,
        input: MappingInput,
    ) -> Result<PathMapping> {
        if !state.records.contains_key(&id) {
            return Err(MappingError::MappingNotFound(id));
        }
        let mapping = input.into_mapping(id)?;
        if let Some(owner) = state.id_for_canonical(mapping.canonical_path()) {
            if owner != mapping.id() {
                return Err(MappingError::DuplicateCanonicalPath(
                    mapping.canonical_path().to_string(),
                ));
            }
        }

        let mut next = state.records.clone();
        next.insert(mapping.id().clone(), mapping.clone());
        self.commit(state, next, ChangeKind::Upserted, &mapping)?;
        Ok(mapping)
    }

    fn commit(
        &self,
        state: &mut StoreState,
        next: BTreeMap<MappingId, PathMapping>,
        kind: ChangeKind,
        subject: &PathMapping,
    ) -> Result<()> {
        let index = ResolverIndex::build(next.values());
        let revision = state.revision + 1;
        let snapshot = MappingSnapshot::new(revision, next.values().cloned().collect());
        self.backend.save(&snapshot).map_err(|error| {
            log::warn!(
                "failed to persist mapping change for {}: {error}",
                subject.canonical_path()
            );
            error
        })?;

        state.records = next;
        self.resolver.swap(index);
        state.revision = revision;
        state.persisted = true;

        let display_path = match kind {
            ChangeKind::Upserted => subject.display_path(),
            ChangeKind::Deleted => self.resolver.resolve(subject.canonical_path()),
        };
        let change = MappingChange {
            revision: state.revision,
            kind,
            id: subject.id().clone(),
            canonical_path: subject.canonical_path().to_string(),
            display_path,
        };
        log::info!(
            "mapping {:?} {} -> {} (revision {})",
            change.kind,
            change.canonical_path,
            change.display_path,
            change.revision
        );
        self.bus.publish(change);
        Ok(())
    }
}

impl Default for MappingStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for MappingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MappingStore")
            .field("mappings", &state.records.len())
            .field("revision", &state.revision)
            .finish()
    }
}
