/// In-memory snapshot source
///
/// Holds an already-built SnapshotSet. Used by the MCP server after a
/// snapshot_replace call and by tests. Loads share the held set instead of
/// copying it.

use std::sync::Arc;
use crate::domain::SnapshotSet;
use crate::snapshot::{SnapshotError, SnapshotSource};

#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotSource {
    snapshot: Arc<SnapshotSet>,
}

impl MemorySnapshotSource {
    pub fn new(snapshot: impl Into<Arc<SnapshotSet>>) -> Self {
        Self { snapshot: snapshot.into() }
    }

    /// Swap in a new snapshot, returning the previous one
    ///
    /// Readers still holding the previous set keep their view of it.
    pub fn replace(&mut self, snapshot: impl Into<Arc<SnapshotSet>>) -> Arc<SnapshotSet> {
        std::mem::replace(&mut self.snapshot, snapshot.into())
    }

    pub fn snapshot(&self) -> &SnapshotSet {
        &self.snapshot
    }
}

impl SnapshotSource for MemorySnapshotSource {
    fn load_snapshot(&self) -> Result<Arc<SnapshotSet>, SnapshotError> {
        Ok(Arc::clone(&self.snapshot))
    }
}
