//! Sources Module
//!
//! External collaborators of the string cache: where archives come from, how
//! they are decoded, and where snapshots are persisted.

mod archive;
mod decoder;
mod kv;

pub use archive::{ArchiveSource, DirArchiveSource, HttpArchiveSource};
pub use decoder::{ArchiveDecoder, Document, JsonArchiveDecoder};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
