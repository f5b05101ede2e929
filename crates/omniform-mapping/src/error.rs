use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Length mismatch: {selectors} selectors, {columns} columns")]
    LengthMismatch { selectors: usize, columns: usize },

    #[error("Duplicate selector in mapping: {0}")]
    DuplicateSelector(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Invalid mapping; save aborted")]
    InvalidMapping,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
