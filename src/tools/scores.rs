/// Tool for per-day advanced scores of one habit
///
/// This module implements the habit_scores MCP tool.

use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsEngine, DailyScoreRow};
use crate::snapshot::{SnapshotError, SnapshotSource};
use crate::tools::{resolve_window, ToolError};
use crate::ServerConfig;

/// Parameters for listing a habit's daily scores
#[derive(Debug, Deserialize)]
pub struct ScoresParams {
    pub habit: String, // name or ID
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Response with one row per scored day
#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub rows: Vec<DailyScoreRow>,
    pub message: String,
}

/// Score every day of a habit within the window
pub fn habit_scores<S: SnapshotSource>(
    source: &S,
    engine: &AnalyticsEngine,
    config: &ServerConfig,
    params: ScoresParams,
) -> Result<ScoresResponse, ToolError> {
    let window = resolve_window(config, params.start_date.as_deref(), params.end_date.as_deref())?;
    let snapshot = source.load_snapshot()?;
    let habit = snapshot
        .find(&params.habit)
        .ok_or_else(|| SnapshotError::HabitNotFound { habit: params.habit.clone() })?;

    let rows = engine.daily_scores(habit, window);

    let message = match rows.last() {
        None => format!("No scores for '{}' between {} and {}", habit.name(), window.start(), window.end()),
        Some(latest) => format!(
            "🎯 {}: {} scored days. Latest ({}): daily {:.1} | weekly {:.1} | monthly {:.1} | trend {}",
            habit.name(),
            rows.len(),
            latest.score.date,
            latest.score.daily_score,
            latest.score.weekly_score,
            latest.score.monthly_score,
            latest.score.trend_direction.as_str()
        ),
    };

    Ok(ScoresResponse { rows, message })
}
