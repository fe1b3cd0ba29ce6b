/// Main entry point for the Habit Analytics MCP server
///
/// This file sets up logging, parses command line arguments, loads the initial
/// snapshot and starts the MCP server. The server listens for JSON-RPC
/// requests over stdin/stdout following the MCP protocol.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habit_analytics_mcp::{
    AnalyticsServer, JsonSnapshotFile, ServerConfig, SnapshotSet, DEFAULT_WINDOW_DAYS,
};

/// Command line arguments for the Habit Analytics MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON snapshot file to analyze
    /// If not provided, the server starts empty until a client sends a snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Length of the default report window, in days
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    window_days: i64,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print the report for the default window as JSON and exit
    #[arg(long)]
    print_report: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_analytics_mcp={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting Habit Analytics MCP server");

    let config = ServerConfig {
        window_days: args.window_days,
        today: args.today,
    };

    let server = match args.snapshot {
        Some(path) => {
            info!("Using snapshot at: {}", path.display());
            AnalyticsServer::from_source(config, &JsonSnapshotFile::new(path))?
        }
        None => AnalyticsServer::new(config, SnapshotSet::default()),
    };

    if args.print_report {
        let report = server.default_report()?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Run the MCP server - this will handle JSON-RPC communication over stdin/stdout
    server.run().await?;

    info!("Habit Analytics MCP server shutdown complete");
    Ok(())
}
