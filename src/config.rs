//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Default snapshot lifetime: 24 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// `CACHE_DIR` value selecting the in-memory store.
pub const MEMORY_CACHE_DIR: &str = ":memory:";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL archives are fetched from; takes precedence over `archive_dir`
    pub archive_base_url: Option<String>,
    /// Directory holding exported archives
    pub archive_dir: PathBuf,
    /// Directory the snapshot is persisted to; `None` keeps it in memory
    pub cache_dir: Option<PathBuf>,
    /// Snapshot lifetime in seconds, never zero
    pub cache_ttl: u64,
    /// Background refresh interval in seconds, 0 disables it
    pub refresh_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ARCHIVE_BASE_URL` - Fetch archives over HTTP from this URL (default: unset)
    /// - `ARCHIVE_DIR` - Read archives from this directory (default: ./wz/String)
    /// - `CACHE_DIR` - Persist snapshots in this directory (default: ./cache, `:memory:` = no persistence)
    /// - `CACHE_TTL` - Snapshot lifetime in seconds (default: 86400, 0 is ignored)
    /// - `REFRESH_INTERVAL` - Background refresh in seconds (default: 3600, 0 = off)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            archive_base_url: env::var("ARCHIVE_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            archive_dir: env::var("ARCHIVE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.archive_dir),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| parse_cache_dir(&v))
                .unwrap_or(defaults.cache_dir),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| parse_cache_ttl(&v))
                .unwrap_or(defaults.cache_ttl),
            refresh_interval: env::var("REFRESH_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_interval),
        }
    }
}

fn parse_cache_dir(value: &str) -> Option<PathBuf> {
    if value.trim() == MEMORY_CACHE_DIR {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// A zero TTL would make every snapshot expired on arrival.
fn parse_cache_ttl(value: &str) -> Option<u64> {
    value.trim().parse().ok().filter(|&ttl| ttl > 0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            archive_base_url: None,
            archive_dir: PathBuf::from("./wz/String"),
            cache_dir: Some(PathBuf::from("./cache")),
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            refresh_interval: 3600,
        }
    }
}
