//! API Module
//!
//! HTTP handlers and routing for the string cache REST API.
//!
//! # Endpoints
//! - `GET /name/:id?category=` - Resolve a display name
//! - `GET /description/:id?category=` - Resolve a description
//! - `GET /search?q=&category=&limit=` - Search names
//! - `GET /ready` - Whether a valid snapshot exists
//! - `POST /load` - Load archives if the snapshot is missing or expired
//! - `POST /reload` - Force a new bulk load
//! - `DELETE /cache` - Drop the snapshot
//! - `GET /stats` - Lookup and load counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
