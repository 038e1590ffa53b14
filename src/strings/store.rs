//! Cache Store Module
//!
//! Holds the current snapshot, decides whether it is still valid, and keeps
//! it persisted so it survives restarts.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::sources::KeyValueStore;
use crate::strings::{CacheStats, Snapshot};

/// Key the snapshot is persisted under.
pub const CACHE_KEY: &str = "wz-string-cache";

// == Cache Store ==
/// Owner of the process-wide snapshot.
///
/// Readers get an `Arc<Snapshot>` without blocking; `commit` and `clear`
/// replace the whole snapshot at once.
pub struct CacheStore {
    kv: Arc<dyn KeyValueStore>,
    current: ArcSwapOption<Snapshot>,
    ttl: Duration,
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store. Nothing is read from `kv` until [`CacheStore::open`].
    pub fn new(kv: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self {
            kv,
            current: ArcSwapOption::empty(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    /// Creates a store and restores the persisted snapshot, if a readable one exists.
    pub async fn open(kv: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        let store = Self::new(kv, ttl);
        store.hydrate().await;
        store
    }

    /// Loads the persisted snapshot into memory.
    ///
    /// Missing, unreadable or foreign-shaped values all leave the store empty.
    async fn hydrate(&self) {
        let bytes = match self.kv.get(CACHE_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No persisted string snapshot found");
                return;
            }
            Err(e) => {
                warn!("Could not read persisted string snapshot: {}", e);
                return;
            }
        };

        match Snapshot::from_bytes(&bytes) {
            Ok(snapshot) => {
                info!(
                    "Restored string snapshot from {} (valid: {})",
                    snapshot.timestamp(),
                    self.is_valid(&snapshot)
                );
                self.current.store(Some(Arc::new(snapshot)));
            }
            Err(e) => warn!("Discarding unreadable string snapshot: {}", e),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    // == Read ==
    /// Returns the current snapshot, valid or not.
    pub fn read(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// Returns the current snapshot only if it is still within its TTL.
    pub fn valid_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.read().filter(|snapshot| self.is_valid(snapshot))
    }

    // == Validity ==
    pub fn is_valid(&self, snapshot: &Snapshot) -> bool {
        self.is_valid_at(snapshot, current_timestamp_ms())
    }

    /// A snapshot is valid while `now - timestamp < ttl`.
    pub fn is_valid_at(&self, snapshot: &Snapshot, now_ms: u64) -> bool {
        u128::from(snapshot.age_ms(now_ms)) < self.ttl.as_millis()
    }

    // == Commit ==
    /// Persists `snapshot` and makes it the current one.
    ///
    /// If persisting fails the previous snapshot stays current.
    pub async fn commit(&self, snapshot: Snapshot) -> Result<Arc<Snapshot>> {
        let bytes = snapshot.to_bytes()?;
        self.kv.put(CACHE_KEY, &bytes).await?;

        let snapshot = Arc::new(snapshot);
        self.current.store(Some(Arc::clone(&snapshot)));
        Ok(snapshot)
    }

    // == Clear ==
    /// Drops the persisted and in-memory snapshot.
    pub async fn clear(&self) -> Result<()> {
        self.kv.remove(CACHE_KEY).await?;
        self.current.store(None);
        info!("String snapshot cleared");
        Ok(())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::sources::MemoryKeyValueStore;
    use crate::strings::test_support::{snapshot_at, FailingKeyValueStore};

    const TTL: Duration = Duration::from_secs(24 * 60 * 60);

    fn memory_store() -> (Arc<MemoryKeyValueStore>, CacheStore) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = CacheStore::new(kv.clone(), TTL);
        (kv, store)
    }

    #[test]
    fn test_snapshot_from_now_is_valid() {
        let (_, store) = memory_store();
        let now = current_timestamp_ms();
        assert!(store.is_valid_at(&snapshot_at(now), now));
        assert!(store.is_valid(&snapshot_at(now)));
    }

    #[test]
    fn test_snapshot_past_ttl_is_invalid() {
        let (_, store) = memory_store();
        let now = current_timestamp_ms();
        let ttl_ms = TTL.as_millis() as u64;

        assert!(!store.is_valid_at(&snapshot_at(now - ttl_ms - 1), now));
        assert!(!store.is_valid_at(&snapshot_at(now - ttl_ms), now));
        assert!(store.is_valid_at(&snapshot_at(now - ttl_ms + 1), now));
    }

    #[test]
    fn test_read_empty() {
        let (_, store) = memory_store();
        assert!(store.read().is_none());
        assert!(store.valid_snapshot().is_none());
    }

    #[tokio::test]
    async fn test_commit_replaces_and_persists() {
        let (kv, store) = memory_store();
        let now = current_timestamp_ms();

        let first = store.commit(snapshot_at(now - 10)).await.unwrap();
        let second = store.commit(snapshot_at(now)).await.unwrap();

        let current = store.read().unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert!(!Arc::ptr_eq(&current, &first));

        let persisted = kv.get(CACHE_KEY).await.unwrap().unwrap();
        assert_eq!(Snapshot::from_bytes(&persisted).unwrap().timestamp(), now);
    }

    #[tokio::test]
    async fn test_stale_snapshot_still_readable() {
        let (_, store) = memory_store();
        store.commit(snapshot_at(0)).await.unwrap();

        assert!(store.read().is_some());
        assert!(store.valid_snapshot().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let (kv, store) = memory_store();
        store.commit(snapshot_at(current_timestamp_ms())).await.unwrap();

        store.clear().await.unwrap();
        assert!(store.read().is_none());
        assert!(kv.get(CACHE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_restores_persisted_snapshot() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let now = current_timestamp_ms();
        CacheStore::new(kv.clone(), TTL)
            .commit(snapshot_at(now))
            .await
            .unwrap();

        let reopened = CacheStore::open(kv, TTL).await;
        assert_eq!(reopened.valid_snapshot().unwrap().timestamp(), now);
    }

    #[tokio::test]
    async fn test_open_discards_corrupt_value() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.put(CACHE_KEY, b"{\"timestamp\": \"yesterday\"}").await.unwrap();

        let store = CacheStore::open(kv, TTL).await;
        assert!(store.read().is_none());
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_previous() {
        let kv = Arc::new(FailingKeyValueStore::default());
        let store = CacheStore::new(kv.clone(), TTL);
        let now = current_timestamp_ms();

        let previous = store.commit(snapshot_at(now - 5)).await.unwrap();
        kv.fail_writes(true);

        let result = store.commit(snapshot_at(now)).await;
        assert!(matches!(result, Err(CacheError::Persist(_))));
        assert!(Arc::ptr_eq(&store.read().unwrap(), &previous));
    }
}
