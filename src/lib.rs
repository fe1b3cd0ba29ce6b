/// Public library interface for the Habit Analytics MCP server
///
/// This module exports the analytics engine, the snapshot data model and the
/// server that exposes them to MCP clients.

use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use thiserror::Error;

// Internal modules
pub mod domain;
pub mod analytics;
pub mod snapshot;
pub mod tools;
pub mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use analytics::{
    AdvancedScore, AnalyticsEngine, AnalyticsReport, DailyScoreRow, ReportBuilder, ReportWindow,
    TrendDirection, DEFAULT_WINDOW_DAYS,
};
pub use snapshot::{JsonSnapshotFile, MemorySnapshotSource, SnapshotError, SnapshotSource};
pub use mcp::McpServer;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] snapshot::SnapshotError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings the server applies when a client leaves them out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Length of the default report window, in days
    pub window_days: i64,
    /// Fixed "today", for reproducible reports; the system date when unset
    pub today: Option<NaiveDate>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            today: None,
        }
    }
}

impl ServerConfig {
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// The window used when a client gives no dates
    pub fn default_window(&self) -> Result<ReportWindow, DomainError> {
        ReportWindow::ending_on(self.today(), self.window_days)
    }
}

/// Main habit analytics server that implements the MCP protocol
///
/// The server owns the current snapshot and the analytics engine. Clients
/// read reports from it and replace its snapshot as a whole.
pub struct AnalyticsServer {
    source: MemorySnapshotSource,
    analytics: AnalyticsEngine,
    config: ServerConfig,
}

impl AnalyticsServer {
    /// Create a new server over an initial snapshot
    pub fn new(config: ServerConfig, snapshot: impl Into<Arc<SnapshotSet>>) -> Self {
        let snapshot = snapshot.into();
        tracing::info!(
            "Initializing Habit Analytics server with {} habits, {}-day default window",
            snapshot.len(),
            config.window_days
        );

        Self {
            source: MemorySnapshotSource::new(snapshot),
            analytics: AnalyticsEngine::new(),
            config,
        }
    }

    /// Create a server whose initial snapshot comes from `source`
    pub fn from_source<S: SnapshotSource>(config: ServerConfig, source: &S) -> Result<Self, ServerError> {
        let snapshot = source.load_snapshot()?;
        Ok(Self::new(config, snapshot))
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Generate a report over the configured default window
    pub fn default_report(&self) -> Result<AnalyticsReport, ServerError> {
        let window = self.config.default_window()?;
        Ok(self.analytics.generate_report(self.source.snapshot(), window))
    }

    /// Get a reference to the snapshot source
    pub fn source(&self) -> &MemorySnapshotSource {
        &self.source
    }

    /// Get a mutable reference to the snapshot source (for replacing it)
    pub fn source_mut(&mut self) -> &mut MemorySnapshotSource {
        &mut self.source
    }

    /// Get a reference to the analytics engine
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
