//! WZ String Cache - game-data string lookups for the admin tools
//!
//! Resolves numeric game-object ids to names and descriptions from a
//! once-a-day snapshot of the decoded string archives.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod strings;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use strings::{BulkLoader, CacheStore, Category, Resolver, Snapshot};
pub use tasks::spawn_refresh_task;
