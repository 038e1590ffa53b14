//! Strings Module
//!
//! Game-data string cache: resolves numeric game-object ids to display names
//! and descriptions from a once-a-day snapshot of the string archives.

mod category;
mod extract;
mod loader;
mod resolver;
mod snapshot;
mod stats;
mod store;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export public types
pub use category::Category;
pub use extract::extract;
pub use loader::BulkLoader;
pub use resolver::{Resolver, SearchHit};
pub use snapshot::{CategoryTable, Snapshot};
pub use stats::{CacheStats, StatsReport};
pub use store::{current_timestamp_ms, CacheStore, CACHE_KEY};
