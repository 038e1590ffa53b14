//! Test doubles shared by the strings unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{CacheError, Result};
use crate::sources::{ArchiveSource, KeyValueStore, MemoryKeyValueStore};
use crate::strings::{Category, CategoryTable, Snapshot};

/// A complete snapshot with empty tables.
pub fn snapshot_at(timestamp: u64) -> Snapshot {
    snapshot_with(timestamp, BTreeMap::new())
}

/// A complete snapshot with the given tables filled in and the rest empty.
pub fn snapshot_with(timestamp: u64, mut tables: BTreeMap<Category, CategoryTable>) -> Snapshot {
    for category in Category::ALL {
        tables.entry(category).or_default();
    }
    Snapshot::new(timestamp, tables).unwrap()
}

pub fn names(pairs: &[(&str, &str)]) -> CategoryTable {
    CategoryTable {
        names: pairs
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect(),
        descriptions: HashMap::new(),
    }
}

/// One small, well-formed document per archive.
pub fn sample_documents() -> HashMap<&'static str, Value> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let doc = match category {
                Category::Equip => json!({
                    "Weapon": {"1302000": {"name": "Sword", "desc": "A basic sword."}}
                }),
                Category::Map => json!({
                    "victoria": {
                        "104000000": {"streetName": "Victoria Road", "mapName": "Lith Harbor"}
                    }
                }),
                Category::Mob => json!({"100100": {"name": "Snail"}}),
                Category::Npc => json!({"100100": {"name": "Shanks"}}),
                other => json!({"1": {"name": format!("{} One", other)}}),
            };
            (category.archive_name(), doc)
        })
        .collect()
}

// == Archive Source Double ==
/// Serves JSON documents from memory, counts fetches, and can be told to
/// fail or stall specific archives.
#[derive(Default)]
pub struct MockArchiveSource {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    fetches: Mutex<HashMap<String, usize>>,
    failing: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl MockArchiveSource {
    pub fn new(documents: HashMap<&'static str, Value>) -> Self {
        let documents = documents
            .into_iter()
            .map(|(name, doc)| (name.to_string(), serde_json::to_vec(&doc).unwrap()))
            .collect();
        Self {
            documents: Mutex::new(documents),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail(&self, archive: &str) {
        self.failing.lock().unwrap().push(archive.to_string());
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn set_document(&self, archive: &str, doc: Value) {
        self.documents
            .lock()
            .unwrap()
            .insert(archive.to_string(), serde_json::to_vec(&doc).unwrap());
    }

    pub fn fetch_count(&self, archive: &str) -> usize {
        self.fetches.lock().unwrap().get(archive).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ArchiveSource for MockArchiveSource {
    async fn fetch(&self, archive: &str) -> Result<Vec<u8>> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(archive.to_string())
            .or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().iter().any(|a| a == archive) {
            return Err(CacheError::fetch(archive, "503 Service Unavailable"));
        }

        self.documents
            .lock()
            .unwrap()
            .get(archive)
            .cloned()
            .ok_or_else(|| CacheError::fetch(archive, "404 Not Found"))
    }
}

// == Key-Value Store Double ==
/// Memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FailingKeyValueStore {
    inner: MemoryKeyValueStore,
    fail_writes: AtomicBool,
}

impl FailingKeyValueStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Persist("disk full".to_string()));
        }
        self.inner.put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }
}
