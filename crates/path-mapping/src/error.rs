use crate::mapping::MappingId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    #[error("Mapping not found: {0}")]
    MappingNotFound(MappingId),

    #[error("Duplicate mapping id: {0}")]
    DuplicateId(MappingId),

    #[error("Canonical path already mapped: {0}")]
    DuplicateCanonicalPath(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, MappingError>;
