//! Request and Response models for the string cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{LookupQuery, SearchQuery, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
pub use responses::{
    CategorySummary, ClearResponse, DescriptionResponse, ErrorResponse, HealthResponse,
    LoadResponse, NameResponse, ReadyResponse, SearchResponse, StatsResponse,
};
