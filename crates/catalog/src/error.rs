use path_mapping::MappingError;
use schema_tree::TreeError;

/// Errors surfaced by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
