//! Error types for the string cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the string cache.
///
/// Cloneable so a single bulk-load failure can be handed to every caller
/// waiting on the same in-flight load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Archive could not be retrieved (not found or transport error)
    #[error("Failed to fetch archive {archive}: {message}")]
    ArchiveFetch { archive: String, message: String },

    /// Archive bytes could not be decoded
    #[error("Failed to decode archive {archive}: {message}")]
    Decode { archive: String, message: String },

    /// Snapshot could not be written to or removed from the persistent store
    #[error("Persistent store error: {0}")]
    Persist(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    pub fn fetch(archive: impl Into<String>, message: impl ToString) -> Self {
        CacheError::ArchiveFetch {
            archive: archive.into(),
            message: message.to_string(),
        }
    }

    pub fn decode(archive: impl Into<String>, message: impl ToString) -> Self {
        CacheError::Decode {
            archive: archive.into(),
            message: message.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::ArchiveFetch { .. } | CacheError::Decode { .. } => StatusCode::BAD_GATEWAY,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Persist(_) | CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the string cache.
pub type Result<T> = std::result::Result<T, CacheError>;
