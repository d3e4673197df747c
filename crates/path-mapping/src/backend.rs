//! Persistence seam for the mapping set.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};
use crate::mapping::PathMapping;

/// Version written into every encoded mapping document.
pub const MAPPING_FILE_VERSION: u32 = 1;

/// The persisted state of a store: its mappings and the revision they were
/// written at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSnapshot {
    pub revision: u64,
    pub mappings: Vec<PathMapping>,
}

impl MappingSnapshot {
    pub fn new(revision: u64, mappings: Vec<PathMapping>) -> Self {
        Self { revision, mappings }
    }
}

/// Durable storage for the full mapping set.
///
/// The store saves the complete snapshot on every mutation and only publishes
/// the change once `save` returns `Ok`. `load` returns `None` when nothing has
/// ever been saved, which is distinct from a saved empty set.
pub trait MappingBackend: Send + Sync {
    fn load(&self) -> Result<Option<MappingSnapshot>>;
    fn save(&self, snapshot: &MappingSnapshot) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct MappingFile {
    version: u32,
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    mappings: Vec<PathMapping>,
}

/// Encodes a snapshot as a pretty JSON document, ordered by canonical path so
/// repeated saves of the same set are byte-identical.
pub fn encode_mappings(snapshot: &MappingSnapshot) -> Result<Vec<u8>> {
    let mut sorted = snapshot.mappings.clone();
    sorted.sort_by(|a, b| {
        a.canonical_path()
            .cmp(b.canonical_path())
            .then_with(|| a.id().cmp(b.id()))
    });
    let file = MappingFile {
        version: MAPPING_FILE_VERSION,
        revision: snapshot.revision,
        mappings: sorted,
    };
    serde_json::to_vec_pretty(&file).map_err(|error| MappingError::Serialization(error.to_string()))
}

/// Decodes a document written by [`encode_mappings`]. Blank input means no
/// document was ever written.
pub fn decode_mappings(bytes: &[u8]) -> Result<Option<MappingSnapshot>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let file: MappingFile = serde_json::from_slice(bytes)
        .map_err(|error| MappingError::Serialization(error.to_string()))?;
    if file.version != MAPPING_FILE_VERSION {
        return Err(MappingError::Serialization(format!(
            "unsupported mapping file version {} (expected {MAPPING_FILE_VERSION})",
            file.version
        )));
    }
    Ok(Some(MappingSnapshot::new(file.revision, file.mappings)))
}

/// Backend that keeps the encoded document in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    document: Mutex<Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `mappings` at revision 0.
    pub fn with_mappings(mappings: &[PathMapping]) -> Result<Self> {
        let snapshot = MappingSnapshot::new(0, mappings.to_vec());
        Ok(Self {
            document: Mutex::new(encode_mappings(&snapshot)?),
        })
    }

    /// The last saved document, empty when nothing was saved.
    pub fn document(&self) -> Vec<u8> {
        self.document.lock().clone()
    }
}

impl MappingBackend for MemoryBackend {
    fn load(&self) -> Result<Option<MappingSnapshot>> {
        decode_mappings(&self.document.lock())
    }

    fn save(&self, snapshot: &MappingSnapshot) -> Result<()> {
        let encoded = encode_mappings(snapshot)?;
        *self.document.lock() = encoded;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{MappingId, MappingInput};

    fn mapping(id: &str, canonical: &str, display: &str) -> PathMapping {
        MappingInput::with_display(canonical, display)
            .into_mapping(MappingId::new(id))
            .expect("valid")
    }

    #[test]
    fn blank_document_is_never_written() {
        assert_eq!(decode_mappings(b"").expect("decode"), None);
        assert_eq!(decode_mappings(b"  \n").expect("decode"), None);
    }

    #[test]
    fn saved_empty_set_is_not_missing() {
        let encoded = encode_mappings(&MappingSnapshot::new(4, Vec::new())).expect("encode");
        let decoded = decode_mappings(&encoded).expect("decode").expect("document");
        assert!(decoded.mappings.is_empty());
        assert_eq!(decoded.revision, 4);
    }

    #[test]
    fn encode_orders_by_canonical_path() {
        let encoded = encode_mappings(&MappingSnapshot::new(
            2,
            vec![
                mapping("2", "user/name", "Profile/Name"),
                mapping("1", "billing", "Finance"),
            ],
        ))
        .expect("encode");
        let decoded = decode_mappings(&encoded).expect("decode").expect("document");
        let order: Vec<_> = decoded
            .mappings
            .iter()
            .map(PathMapping::canonical_path)
            .collect();
        assert_eq!(order, vec!["billing", "user/name"]);
    }

    #[test]
    fn encoding_is_stable() {
        let a = MappingSnapshot::new(1, vec![mapping("1", "a", "A"), mapping("2", "b", "B")]);
        let b = MappingSnapshot::new(1, vec![mapping("2", "b", "B"), mapping("1", "a", "A")]);
        assert_eq!(
            encode_mappings(&a).expect("a"),
            encode_mappings(&b).expect("b")
        );
    }

    #[test]
    fn missing_revision_defaults_to_zero() {
        let decoded = decode_mappings(br#"{"version": 1, "mappings": []}"#)
            .expect("decode")
            .expect("document");
        assert_eq!(decoded.revision, 0);
    }

    #[test]
    fn rejects_unknown_version() {
        let err = decode_mappings(br#"{"version": 9, "mappings": []}"#).unwrap_err();
        assert!(matches!(err, MappingError::Serialization(_)));
    }

    #[test]
    fn rejects_malformed_document() {
        let err = decode_mappings(b"{not json").unwrap_err();
        assert!(matches!(err, MappingError::Serialization(_)));
    }

    #[test]
    fn memory_backend_round_trips_saved_snapshot() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load().expect("load"), None);
        backend
            .save(&MappingSnapshot::new(
                3,
                vec![mapping("1", "user/email", "Profile/Email")],
            ))
            .expect("save");
        let loaded = backend.load().expect("load").expect("document");
        assert_eq!(loaded.revision, 3);
        assert_eq!(loaded.mappings[0].display_path(), "Profile/Email");
    }
}
