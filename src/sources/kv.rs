//! Persistent Key-Value Store
//!
//! Byte store the snapshot is persisted to so it survives restarts.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CacheError, Result};

/// Durable byte store keyed by string.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value`, replacing any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes the key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

// == File Store ==
/// Stores each key as one file inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Persist(e.to_string())),
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CacheError::Persist(e.to_string()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| CacheError::Persist(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| CacheError::Persist(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Persist(e.to_string())),
        }
    }
}

// == Memory Store ==
/// Process-local store, used when no cache directory is configured.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_put_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("cache"));

        assert_eq!(store.get("strings").await.unwrap(), None);

        store.put("strings", b"first").await.unwrap();
        store.put("strings", b"second").await.unwrap();
        assert_eq!(store.get("strings").await.unwrap(), Some(b"second".to_vec()));

        store.remove("strings").await.unwrap();
        assert_eq!(store.get("strings").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_remove_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert!(store.remove("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_file_store_survives_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        FileKeyValueStore::new(dir.path())
            .put("strings", b"persisted")
            .await
            .unwrap();

        let reopened = FileKeyValueStore::new(dir.path());
        assert_eq!(reopened.get("strings").await.unwrap(), Some(b"persisted".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryKeyValueStore::new();
        store.put("k", b"v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
