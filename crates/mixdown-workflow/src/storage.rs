//! The persistent storage contract.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage key under which the custom workflow collection lives.
pub const CUSTOM_WORKFLOWS_KEY: &str = "customWorkflows";

/// Named-blob storage consumed by the catalog.
///
/// The contract is deliberately small: load a blob by key (absent keys are
/// `None`, not errors) and replace a blob by key. No partial writes, no
/// concurrent-writer protocol; last write wins.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Loads the blob stored under `key`, if any.
    async fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    async fn save(&self, key: &str, value: String) -> StoreResult<()>;
}

/// In-memory store; the default for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with one blob.
    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
        store
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(blobs.get(key).cloned())
    }

    async fn save(&self, key: &str, value: String) -> StoreResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        blobs.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed store: one JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl WorkflowStore for JsonFileStore {
    async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, key: &str, value: String) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }
}
