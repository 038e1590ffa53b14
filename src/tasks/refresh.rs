//! Snapshot Refresh Task
//!
//! Background task that periodically makes sure a valid snapshot exists, so
//! the first lookup after expiry does not wait on a bulk load.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::strings::BulkLoader;

/// Spawns a background task that calls `ensure_loaded` on every tick.
///
/// The first tick runs immediately so the service warms up at start. A
/// failed load is logged and left for the next tick; the previous snapshot
/// keeps serving lookups meanwhile.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_refresh_task(loader: Arc<BulkLoader>, refresh_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(refresh_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting snapshot refresh task with interval of {} seconds",
            interval.as_secs()
        );

        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            match loader.ensure_loaded().await {
                Ok(snapshot) => info!(
                    "Snapshot refresh: current snapshot from {}",
                    snapshot.timestamp()
                ),
                Err(e) => warn!("Snapshot refresh failed: {}", e),
            }
        }
    })
}
