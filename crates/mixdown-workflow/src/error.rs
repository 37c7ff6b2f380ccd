//! Catalog and storage error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by catalog mutations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The storage backend rejected a read or write.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The collection could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by a [`WorkflowStore`](crate::storage::WorkflowStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend is unreachable or refused the operation.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// An I/O failure from a file-backed store.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Degraded-startup conditions surfaced by the catalog load.
///
/// These are warnings, not failures: the catalog always comes up, with an
/// empty custom collection when storage cannot be read.
#[derive(Debug, Error)]
pub enum CatalogWarning {
    /// Storage could not be read; starting with an empty collection.
    #[error("stored workflows unreadable: {0}")]
    Unreadable(#[source] StoreError),

    /// The stored document did not parse; starting with an empty collection.
    #[error("stored workflows malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}
