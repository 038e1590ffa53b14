//! Bulk Loader Module
//!
//! Builds a new snapshot by fetching, decoding and extracting every category
//! in parallel, and commits it only if every category succeeded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::future::{try_join_all, BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{CacheError, Result};
use crate::sources::{ArchiveDecoder, ArchiveSource};
use crate::strings::store::current_timestamp_ms;
use crate::strings::{extract, CacheStore, Category, CategoryTable, Snapshot};

type LoadFuture = Shared<BoxFuture<'static, Result<Arc<Snapshot>>>>;

/// A spawned bulk load and the handle callers join.
///
/// `done` is set by the spawned task itself, so a load whose callers all
/// went away is still seen as finished.
#[derive(Clone)]
struct InFlight {
    future: LoadFuture,
    done: Arc<AtomicBool>,
}

impl InFlight {
    fn is_running(&self) -> bool {
        !self.done.load(Ordering::Acquire)
    }
}

/// Marks the load finished when the spawned task ends, panics included.
struct MarkDone(Arc<AtomicBool>);

impl Drop for MarkDone {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

// == Bulk Loader ==
/// Makes sure a valid snapshot exists, coalescing concurrent requests.
///
/// At most one bulk load runs at a time. Callers arriving while one is in
/// flight wait on it and receive the same snapshot or the same error.
pub struct BulkLoader {
    store: Arc<CacheStore>,
    source: Arc<dyn ArchiveSource>,
    decoder: Arc<dyn ArchiveDecoder>,
    in_flight: Mutex<Option<InFlight>>,
}

impl BulkLoader {
    pub fn new(
        store: Arc<CacheStore>,
        source: Arc<dyn ArchiveSource>,
        decoder: Arc<dyn ArchiveDecoder>,
    ) -> Self {
        Self {
            store,
            source,
            decoder,
            in_flight: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    // == Ensure Loaded ==
    /// Returns the current snapshot if it is valid, otherwise runs (or joins)
    /// a bulk load.
    ///
    /// A failed load leaves the store as it was and is not retried.
    pub async fn ensure_loaded(&self) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.store.valid_snapshot() {
            debug!("String snapshot is valid, skipping bulk load");
            return Ok(snapshot);
        }
        self.join_or_start(false).await
    }

    // == Reload ==
    /// Runs a bulk load even if the current snapshot is still valid.
    pub async fn reload(&self) -> Result<Arc<Snapshot>> {
        self.join_or_start(true).await
    }

    async fn join_or_start(&self, force: bool) -> Result<Arc<Snapshot>> {
        let load = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.as_ref().filter(|load| load.is_running()) {
                Some(load) => {
                    debug!("Joining in-flight bulk load");
                    load.clone()
                }
                None => {
                    // Another caller may have committed while we waited for the lock.
                    if !force {
                        if let Some(snapshot) = self.store.valid_snapshot() {
                            return Ok(snapshot);
                        }
                    }
                    let load = self.start_load();
                    *in_flight = Some(load.clone());
                    load
                }
            }
        };

        let result = load.future.clone().await;

        let mut in_flight = self.in_flight.lock().await;
        if in_flight
            .as_ref()
            .is_some_and(|current| current.future.ptr_eq(&load.future))
        {
            *in_flight = None;
        }
        drop(in_flight);

        match result {
            Ok(snapshot) if !force && !self.store.is_valid(&snapshot) => {
                Err(CacheError::Internal(
                    "Bulk load produced a snapshot that is already expired".to_string(),
                ))
            }
            other => other,
        }
    }

    /// Spawns the load on its own task so it completes even if every caller
    /// stops waiting.
    fn start_load(&self) -> InFlight {
        let done = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn({
            let done = Arc::clone(&done);
            let load = bulk_load(
                Arc::clone(&self.store),
                Arc::clone(&self.source),
                Arc::clone(&self.decoder),
            );
            async move {
                let _done = MarkDone(done);
                load.await
            }
        });

        let future = async move {
            task.await
                .unwrap_or_else(|e| Err(CacheError::Internal(format!("Bulk load task failed: {}", e))))
        }
        .boxed()
        .shared();

        InFlight { future, done }
    }
}

// == Bulk Load ==
async fn bulk_load(
    store: Arc<CacheStore>,
    source: Arc<dyn ArchiveSource>,
    decoder: Arc<dyn ArchiveDecoder>,
) -> Result<Arc<Snapshot>> {
    let started = Instant::now();
    info!("Starting bulk load of {} string archives", Category::ALL.len());

    match build_and_commit(&store, source, decoder).await {
        Ok(snapshot) => {
            store.stats().record_load();
            let total: usize = snapshot.tables().map(|(_, table)| table.len()).sum();
            info!(
                "Bulk load finished in {}ms: {} names across {} categories",
                started.elapsed().as_millis(),
                total,
                Category::ALL.len()
            );
            Ok(snapshot)
        }
        Err(e) => {
            store.stats().record_load_failure();
            warn!("Bulk load failed, keeping previous snapshot: {}", e);
            Err(e)
        }
    }
}

async fn build_and_commit(
    store: &CacheStore,
    source: Arc<dyn ArchiveSource>,
    decoder: Arc<dyn ArchiveDecoder>,
) -> Result<Arc<Snapshot>> {
    let loads = Category::ALL
        .into_iter()
        .map(|category| load_category(category, Arc::clone(&source), Arc::clone(&decoder)));
    let tables = try_join_all(loads).await?;

    let snapshot = Snapshot::from_tables(current_timestamp_ms(), tables)?;
    store.commit(snapshot).await
}

/// Fetch, decode and extract one category. Decoding runs on the blocking pool.
async fn load_category(
    category: Category,
    source: Arc<dyn ArchiveSource>,
    decoder: Arc<dyn ArchiveDecoder>,
) -> Result<(Category, CategoryTable)> {
    let archive = category.archive_name();
    let bytes = source.fetch(archive).await?;

    let table = tokio::task::spawn_blocking(move || {
        let document = decoder.decode(archive, &bytes)?;
        extract(category, &document)
    })
    .await
    .map_err(|e| CacheError::decode(archive, e))??;

    debug!(
        "Extracted {} names and {} descriptions from {}",
        table.names.len(),
        table.descriptions.len(),
        archive
    );
    Ok((category, table))
}
