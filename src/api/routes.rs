//! API Routes
//!
//! Configures the Axum router with all string cache endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, description_handler, health_handler, load_handler, name_handler,
    ready_handler, reload_handler, search_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: the admin front end is served from another origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/name/:id", get(name_handler))
        .route("/description/:id", get(description_handler))
        .route("/search", get(search_handler))
        .route("/ready", get(ready_handler))
        .route("/load", post(load_handler))
        .route("/reload", post(reload_handler))
        .route("/cache", delete(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
