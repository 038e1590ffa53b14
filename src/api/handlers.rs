//! API Handlers
//!
//! HTTP request handlers for each string cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DescriptionResponse, HealthResponse, LoadResponse, LookupQuery, NameResponse,
    ReadyResponse, SearchQuery, SearchResponse, StatsResponse,
};
use crate::sources::{
    ArchiveDecoder, ArchiveSource, DirArchiveSource, FileKeyValueStore, HttpArchiveSource,
    JsonArchiveDecoder, KeyValueStore, MemoryKeyValueStore,
};
use crate::strings::{current_timestamp_ms, BulkLoader, CacheStore, Resolver};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Coalescing bulk loader, owns the store
    pub loader: Arc<BulkLoader>,
    /// Read-only lookups over the same store
    pub resolver: Resolver,
}

impl AppState {
    /// Creates a new AppState around the given loader.
    pub fn new(loader: BulkLoader) -> Self {
        let resolver = Resolver::new(Arc::clone(loader.store()));
        Self {
            loader: Arc::new(loader),
            resolver,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Picks the archive source and persistent store from the Config and
    /// restores any persisted snapshot.
    pub async fn from_config(config: &Config) -> Self {
        let source: Arc<dyn ArchiveSource> = match &config.archive_base_url {
            Some(url) => Arc::new(HttpArchiveSource::new(url.clone())),
            None => Arc::new(DirArchiveSource::new(config.archive_dir.clone())),
        };
        let kv: Arc<dyn KeyValueStore> = match &config.cache_dir {
            Some(dir) => Arc::new(FileKeyValueStore::new(dir.clone())),
            None => Arc::new(MemoryKeyValueStore::new()),
        };
        let decoder: Arc<dyn ArchiveDecoder> = Arc::new(JsonArchiveDecoder);

        let store = CacheStore::open(kv, Duration::from_secs(config.cache_ttl)).await;
        Self::new(BulkLoader::new(Arc::new(store), source, decoder))
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        self.loader.store()
    }
}

/// Handler for GET /name/:id
///
/// Resolves a display name; echoes the id on a miss.
pub async fn name_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<NameResponse>> {
    let category = query.category()?;
    let name = state.resolver.resolve_name(&id, category);

    Ok(Json(NameResponse::new(id, category, name)))
}

/// Handler for GET /description/:id
///
/// Resolves a description; `null` when there is none.
pub async fn description_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<DescriptionResponse>> {
    let category = query.category()?;
    let description = state.resolver.resolve_description(&id, category);

    Ok(Json(DescriptionResponse::new(id, category, description)))
}

/// Handler for GET /search
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }
    let category = query.category()?;
    let results = state.resolver.search(&query.q, category, query.limit());

    Ok(Json(SearchResponse {
        query: query.q,
        results,
    }))
}

/// Handler for GET /ready
pub async fn ready_handler(State(state): State<AppState>) -> Json<ReadyResponse> {
    let snapshot = state.store().read();
    Json(ReadyResponse::new(
        state.resolver.is_ready(),
        snapshot.as_deref(),
        current_timestamp_ms(),
    ))
}

/// Handler for POST /load
///
/// Loads archives only if the current snapshot has expired or is missing.
pub async fn load_handler(State(state): State<AppState>) -> Result<Json<LoadResponse>> {
    let snapshot = state.loader.ensure_loaded().await?;
    Ok(Json(LoadResponse::from_snapshot(&snapshot)))
}

/// Handler for POST /reload
pub async fn reload_handler(State(state): State<AppState>) -> Result<Json<LoadResponse>> {
    let snapshot = state.loader.reload().await?;
    Ok(Json(LoadResponse::from_snapshot(&snapshot)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.store().clear().await?;
    Ok(Json(ClearResponse::cleared()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.store().stats().report()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
