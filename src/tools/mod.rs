/// MCP tools exposing the analytics engine
///
/// This module contains the tools that external MCP clients can call to read
/// reports and per-day scores and to replace the snapshot being analyzed.

pub mod report;
pub mod scores;
pub mod snapshot;

// Re-export tool functions for easy access
pub use report::*;
pub use scores::*;
pub use snapshot::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::analytics::ReportWindow;
use crate::domain::DomainError;
use crate::snapshot::SnapshotError;
use crate::ServerConfig;

/// Errors a tool call can fail with
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Parse an optional YYYY-MM-DD argument
pub fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, ToolError> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| ToolError::InvalidDate { value: s.to_string() })
        })
        .transpose()
}

/// Resolve optional start/end arguments against the server defaults
///
/// A missing end date means today; a missing start date means the
/// configured number of days before the end date.
pub fn resolve_window(
    config: &ServerConfig,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<ReportWindow, ToolError> {
    let end = parse_date(end_date)?.unwrap_or_else(|| config.today());
    match parse_date(start_date)? {
        Some(start) => Ok(ReportWindow::new(start, end)?),
        None => Ok(ReportWindow::ending_on(end, config.window_days)?),
    }
}
