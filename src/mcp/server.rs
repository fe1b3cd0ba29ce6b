/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Answers tool calls from the analytics engine
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ReplaceSnapshotParams, ReportParams, ScoresParams, ToolError};
use crate::{AnalyticsServer, ServerError};

/// MCP server that answers analytics requests from an MCP client
pub struct McpServer {
    /// The underlying analytics server
    analytics_server: AnalyticsServer,
    /// Whether the client has completed the handshake
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(analytics_server: AnalyticsServer) -> Self {
        Self {
            analytics_server,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        // Write response + newline
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Blank lines produce no response.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request).await)
    }

    /// Handle a JSON-RPC request
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                None,
            );
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request).await,
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    /// Handle MCP initialization request
    async fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.params.clone().map(serde_json::from_value::<InitializeParams>) {
            Some(Ok(params)) => info!(
                "MCP client connected: {} {} (protocol {})",
                params.client_info.name, params.client_info.version, params.protocol_version
            ),
            Some(Err(e)) => warn!("MCP client connected with unreadable initialize params: {}", e),
            None => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Analytics MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        respond(request.id, &result)
    }

    /// Handle tools/list request
    async fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let window_properties = json!({
            "start_date": {"type": "string", "description": "First day of the window (YYYY-MM-DD, optional - defaults to window_days before end_date)"},
            "end_date": {"type": "string", "description": "Last day of the window (YYYY-MM-DD, optional - defaults to today)"}
        });

        let mut scores_properties = window_properties.clone();
        scores_properties["habit"] = json!({"type": "string", "description": "Name or ID of the habit"});

        let tools = vec![
            ToolDefinition {
                name: "analytics_report".to_string(),
                description: "Generate the analytics report: overall score, trends, correlations, streaks, recommendations and weekly/monthly breakdowns".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": window_properties,
                    "required": []
                }),
            },
            ToolDefinition {
                name: "habit_scores".to_string(),
                description: "List the advanced daily, weekly and monthly scores of one habit for each day in a window".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": scores_properties,
                    "required": ["habit"]
                }),
            },
            ToolDefinition {
                name: "snapshot_replace".to_string(),
                description: "Replace the analyzed habit data with a new snapshot (scores, entries and optional streaks per habit)".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habits": {"type": "array", "description": "Habit snapshots to analyze", "items": {"type": "object"}}
                    },
                    "required": ["habits"]
                }),
            },
            ToolDefinition {
                name: "snapshot_summary".to_string(),
                description: "Count the habits, score samples and entries in the current snapshot".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
        ];

        JsonRpcResponse::success(request.id, json!({"tools": tools}))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        debug!("Calling tool {}", tool_params.name);

        let result = match tool_params.name.as_str() {
            "analytics_report" => self.call_analytics_report(tool_params.arguments),
            "habit_scores" => self.call_habit_scores(tool_params.arguments),
            "snapshot_replace" => self.call_snapshot_replace(tool_params.arguments),
            "snapshot_summary" => self.call_snapshot_summary(),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        respond(request.id, &result)
    }

    /// Call the analytics_report tool
    fn call_analytics_report(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = ReportParams {
            start_date: string_arg(&args, "start_date"),
            end_date: string_arg(&args, "end_date"),
        };

        let server = &self.analytics_server;
        match tools::analytics_report(server.source(), server.analytics(), server.config(), params) {
            Ok(response) => match serde_json::to_string_pretty(&response.report) {
                Ok(report) => ToolCallResult::success(format!("{}\n\n{}", response.message, report)),
                Err(e) => ToolCallResult::error(e.to_string()),
            },
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_scores tool
    fn call_habit_scores(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let Some(habit) = string_arg(&args, "habit") else {
            return ToolCallResult::error(
                ToolError::InvalidParams("missing required argument 'habit'".to_string()).to_string(),
            );
        };

        let params = ScoresParams {
            habit,
            start_date: string_arg(&args, "start_date"),
            end_date: string_arg(&args, "end_date"),
        };

        let server = &self.analytics_server;
        match tools::habit_scores(server.source(), server.analytics(), server.config(), params) {
            Ok(response) => match serde_json::to_string_pretty(&response.rows) {
                Ok(rows) => ToolCallResult::success(format!("{}\n\n{}", response.message, rows)),
                Err(e) => ToolCallResult::error(e.to_string()),
            },
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the snapshot_replace tool
    fn call_snapshot_replace(&mut self, args: HashMap<String, Value>) -> ToolCallResult {
        let arguments = Value::Object(args.into_iter().collect());
        let params: ReplaceSnapshotParams = match serde_json::from_value(arguments) {
            Ok(p) => p,
            Err(e) => {
                return ToolCallResult::error(ToolError::InvalidParams(format!("invalid snapshot: {}", e)).to_string())
            }
        };

        match tools::replace_snapshot(self.analytics_server.source_mut(), params) {
            Ok(summary) => ToolCallResult::success(format!("Snapshot replaced. {}", summary.message)),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the snapshot_summary tool
    fn call_snapshot_summary(&self) -> ToolCallResult {
        match tools::snapshot_summary(self.analytics_server.source()) {
            Ok(summary) => ToolCallResult::success(summary.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}

fn string_arg(args: &HashMap<String, Value>, key: &str) -> Option<String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Wrap a serializable result, falling back to an internal error
fn respond<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            JsonRpcResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize response: {}", e),
                None,
            )
        }
    }
}
