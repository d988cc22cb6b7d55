//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when using local storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the storage directory.
    #[error("Failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write a record.
    #[error("Store operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key is empty or contains characters that are not allowed.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}
