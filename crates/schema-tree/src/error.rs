#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a folder: {0}")]
    NotAFolder(String),
}

pub type Result<T> = std::result::Result<T, TreeError>;
