/// Tools for inspecting and replacing the analyzed snapshot
///
/// This module implements the snapshot_replace and snapshot_summary MCP
/// tools. Replacing is all-or-nothing: an invalid habit leaves the current
/// snapshot untouched.

use serde::{Deserialize, Serialize};

use crate::domain::{HabitSnapshot, SnapshotSet};
use crate::snapshot::{MemorySnapshotSource, SnapshotSource};
use crate::tools::ToolError;

/// Parameters for replacing the snapshot
#[derive(Debug, Deserialize)]
pub struct ReplaceSnapshotParams {
    pub habits: Vec<HabitSnapshot>,
}

/// Counts describing a snapshot
#[derive(Debug, Serialize)]
pub struct SnapshotSummary {
    pub total_habits: usize,
    pub archived_habits: usize,
    pub score_samples: usize,
    pub entries: usize,
    pub message: String,
}

/// Swap the server's snapshot for a new one
pub fn replace_snapshot(
    source: &mut MemorySnapshotSource,
    params: ReplaceSnapshotParams,
) -> Result<SnapshotSummary, ToolError> {
    let snapshot = SnapshotSet::new(params.habits)?;
    source.replace(snapshot);
    tracing::info!("Snapshot replaced with {} habits", source.snapshot().len());
    snapshot_summary(source)
}

/// Summarize the source's current snapshot
pub fn snapshot_summary<S: SnapshotSource>(source: &S) -> Result<SnapshotSummary, ToolError> {
    let snapshot = source.load_snapshot()?;

    let total_habits = snapshot.len();
    let archived_habits = snapshot.all().iter().filter(|h| h.is_archived()).count();
    let score_samples = snapshot.all().iter().map(|h| h.scores().len()).sum();
    let entries = snapshot.all().iter().map(|h| h.entries().len()).sum();

    let message = if total_habits == 0 {
        "No habits in the snapshot. Use snapshot_replace to load habit data.".to_string()
    } else {
        format!(
            "📋 {} habits ({} archived), {} score samples, {} entries",
            total_habits, archived_habits, score_samples, entries
        )
    };

    Ok(SnapshotSummary {
        total_habits,
        archived_habits,
        score_samples,
        entries,
        message,
    })
}
