/// Snapshot layer: where habit data enters the analytics engine
///
/// The engine never talks to a live habit store. A SnapshotSource hands out a
/// complete, immutable SnapshotSet, and the caller replaces it wholesale when
/// the underlying data changes.

pub mod json;
pub mod memory;

// Re-export the main snapshot types
pub use json::*;
pub use memory::*;

use std::sync::Arc;
use thiserror::Error;
use crate::domain::{DomainError, SnapshotSet};

/// Errors that can occur while acquiring a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Habit not found: {habit}")]
    HabitNotFound { habit: String },
}

/// Trait defining how the engine obtains habit data
///
/// Implementations must return a consistent point-in-time view; the engine
/// assumes nothing changes underneath it while a report is built. The set is
/// shared, so handing it to several readers does not copy the habit data.
pub trait SnapshotSource {
    /// Load the current snapshot of every habit, archived ones included
    fn load_snapshot(&self) -> Result<Arc<SnapshotSet>, SnapshotError>;
}
