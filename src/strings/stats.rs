//! Cache Statistics Module
//!
//! Tracks lookup hits and misses plus bulk-load outcomes.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Live counters, shared by the resolver and the bulk loader.
#[derive(Debug, Default)]
pub struct CacheStats {
    name_hits: AtomicU64,
    name_misses: AtomicU64,
    description_hits: AtomicU64,
    description_misses: AtomicU64,
    loads: AtomicU64,
    load_failures: AtomicU64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_name(&self, hit: bool) {
        let counter = if hit { &self.name_hits } else { &self.name_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_description(&self, hit: bool) {
        let counter = if hit {
            &self.description_hits
        } else {
            &self.description_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn report(&self) -> StatsReport {
        StatsReport {
            name_hits: self.name_hits.load(Ordering::Relaxed),
            name_misses: self.name_misses.load(Ordering::Relaxed),
            description_hits: self.description_hits.load(Ordering::Relaxed),
            description_misses: self.description_misses.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
        }
    }
}

// == Stats Report ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub name_hits: u64,
    pub name_misses: u64,
    pub description_hits: u64,
    pub description_misses: u64,
    /// Successful bulk loads
    pub loads: u64,
    /// Bulk loads that failed and left the previous snapshot in place
    pub load_failures: u64,
}

impl StatsReport {
    /// Calculates the lookup hit rate across names and descriptions.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.name_hits + self.description_hits;
        let total = hits + self.name_misses + self.description_misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
