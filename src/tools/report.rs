/// Tool for generating the analytics report
///
/// This module implements the analytics_report MCP tool.

use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsEngine, AnalyticsReport};
use crate::snapshot::SnapshotSource;
use crate::tools::{resolve_window, ToolError};
use crate::ServerConfig;

/// Parameters for generating a report
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub start_date: Option<String>, // YYYY-MM-DD, defaults to window_days before end
    pub end_date: Option<String>,   // YYYY-MM-DD, defaults to today
}

/// Response from generating a report
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: AnalyticsReport,
    pub summary: String,
    pub message: String,
}

/// Generate a report from the source's current snapshot
pub fn analytics_report<S: SnapshotSource>(
    source: &S,
    engine: &AnalyticsEngine,
    config: &ServerConfig,
    params: ReportParams,
) -> Result<ReportResponse, ToolError> {
    let window = resolve_window(config, params.start_date.as_deref(), params.end_date.as_deref())?;
    let snapshot = source.load_snapshot()?;
    let report = engine.generate_report(&snapshot, window);

    let summary = format!(
        "📊 Overall score {:.1}/100 from {} to {} ({} habits). Trend: {}. {} correlations, {} recommendations.",
        report.overall_score,
        report.start_date,
        report.end_date,
        snapshot.active().len(),
        report.trend_analysis.overall_trend.as_str(),
        report.habit_correlations.len(),
        report.recommendations.len()
    );

    let details = report
        .recommendations
        .iter()
        .map(|r| format!("💡 [{:?}] {}", r.priority, r.message))
        .collect::<Vec<_>>()
        .join("\n");

    let message = if details.is_empty() {
        summary.clone()
    } else {
        format!("{}\n\n{}", summary, details)
    };

    Ok(ReportResponse {
        report,
        summary,
        message,
    })
}
