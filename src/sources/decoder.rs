//! Archive Decoder
//!
//! Seam for the binary game-data parser. A decoder turns one archive's raw
//! bytes into a structured [`Document`] tree the extractors can walk.

use crate::error::{CacheError, Result};

/// Decoded archive contents.
pub type Document = serde_json::Value;

/// Turns raw archive bytes into a document.
///
/// Implementations must be deterministic and free of side effects; the bulk
/// loader calls them from the blocking thread pool.
pub trait ArchiveDecoder: Send + Sync {
    fn decode(&self, archive: &str, bytes: &[u8]) -> Result<Document>;
}

// == JSON Decoder ==
/// Decoder for archives that were exported to JSON ahead of time.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArchiveDecoder;

impl ArchiveDecoder for JsonArchiveDecoder {
    fn decode(&self, archive: &str, bytes: &[u8]) -> Result<Document> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::decode(archive, e))
    }
}
