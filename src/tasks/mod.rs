//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Snapshot refresh: keeps a valid string snapshot loaded

mod refresh;

pub use refresh::spawn_refresh_task;
