/// JSON snapshot files
///
/// A snapshot file is a JSON object `{"habits": [...]}` whose habits follow
/// the HabitSnapshot wire format. Validation happens while parsing, so a
/// file with a zero frequency denominator or an out-of-range score is
/// rejected as a whole.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::SnapshotSet;
use crate::snapshot::{SnapshotError, SnapshotSource};

/// Parse a snapshot from JSON text
pub fn parse_snapshot(json: &str) -> Result<SnapshotSet, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// Snapshot source backed by a JSON file, read on every load
#[derive(Debug, Clone)]
pub struct JsonSnapshotFile {
    path: PathBuf,
}

impl JsonSnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonSnapshotFile {
    fn load_snapshot(&self) -> Result<Arc<SnapshotSet>, SnapshotError> {
        let text = std::fs::read_to_string(&self.path)?;
        let snapshot = parse_snapshot(&text)?;

        tracing::info!(
            "Loaded snapshot from {} with {} habits",
            self.path.display(),
            snapshot.len()
        );
        Ok(Arc::new(snapshot))
    }
}
