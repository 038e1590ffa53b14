//! Response DTOs for the string cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::strings::{Category, SearchHit, Snapshot, StatsReport};

/// Formats a Unix-millisecond timestamp as RFC 3339.
fn rfc3339_from_ms(ms: u64) -> Option<String> {
    let ms = i64::try_from(ms).ok()?;
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.to_rfc3339())
}

/// Response body for `GET /name/:id`
#[derive(Debug, Clone, Serialize)]
pub struct NameResponse {
    pub id: String,
    pub category: Option<Category>,
    /// Resolved name, or the id itself on a miss
    pub name: String,
}

impl NameResponse {
    pub fn new(id: impl Into<String>, category: Option<Category>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
        }
    }
}

/// Response body for `GET /description/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DescriptionResponse {
    pub id: String,
    pub category: Option<Category>,
    pub description: Option<String>,
}

impl DescriptionResponse {
    pub fn new(id: impl Into<String>, category: Option<Category>, description: Option<String>) -> Self {
        Self {
            id: id.into(),
            category,
            description,
        }
    }
}

/// Response body for `GET /ready`
#[derive(Debug, Clone, Serialize)]
pub struct ReadyResponse {
    /// Whether a snapshot within its TTL exists
    pub ready: bool,
    /// Creation time of the current snapshot, valid or not
    pub snapshot_timestamp: Option<String>,
    pub age_seconds: Option<u64>,
}

impl ReadyResponse {
    pub fn new(ready: bool, snapshot: Option<&Snapshot>, now_ms: u64) -> Self {
        Self {
            ready,
            snapshot_timestamp: snapshot.and_then(|s| rfc3339_from_ms(s.timestamp())),
            age_seconds: snapshot.map(|s| s.age_ms(now_ms) / 1000),
        }
    }
}

/// Per-category counts in a [`LoadResponse`]
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub archive: &'static str,
    pub names: usize,
    pub descriptions: usize,
}

/// Response body for `POST /load` and `POST /reload`
#[derive(Debug, Clone, Serialize)]
pub struct LoadResponse {
    pub timestamp: Option<String>,
    pub categories: Vec<CategorySummary>,
}

impl LoadResponse {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            timestamp: rfc3339_from_ms(snapshot.timestamp()),
            categories: snapshot
                .tables()
                .map(|(category, table)| CategorySummary {
                    category,
                    archive: category.archive_name(),
                    names: table.names.len(),
                    descriptions: table.descriptions.len(),
                })
                .collect(),
        }
    }
}

/// Response body for `GET /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "String cache cleared".to_string(),
        }
    }
}

/// Response body for the stats endpoint (`GET /stats`)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counters: StatsReport,
    /// Lookup hit rate across names and descriptions
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(counters: StatsReport) -> Self {
        Self {
            hit_rate: counters.hit_rate(),
            counters,
        }
    }
}

/// Response body for the health endpoint (`GET /health`)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
