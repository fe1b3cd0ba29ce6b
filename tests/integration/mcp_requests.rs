/// JSON-RPC requests through the MCP server, without stdio
use chrono::NaiveDate;
use habit_analytics_mcp::*;
use serde_json::{json, Value};

#[cfg(test)]
mod mcp_request_tests {
    use super::*;

    fn server() -> McpServer {
        let config = ServerConfig {
            window_days: 13,
            today: NaiveDate::from_ymd_opt(2024, 4, 14),
        };
        McpServer::new(AnalyticsServer::new(config, SnapshotSet::default()))
    }

    fn habit_json(name: &str, value: f64) -> Value {
        let scores: Vec<Value> = (1..=14)
            .map(|d| json!({"date": format!("2024-04-{:02}", d), "value": value}))
            .collect();
        let entries: Vec<Value> = (1..=14)
            .map(|d| json!({"date": format!("2024-04-{:02}", d), "value": 1.0}))
            .collect();
        json!({
            "name": name,
            "frequency": {"numerator": 1, "denominator": 1},
            "scores": scores,
            "entries": entries
        })
    }

    async fn call(server: &mut McpServer, request: Value) -> Value {
        let response = server
            .process_line(&request.to_string())
            .await
            .expect("request should get a response");
        serde_json::to_value(response).unwrap()
    }

    async fn call_tool(server: &mut McpServer, name: &str, arguments: Value) -> Value {
        call(
            server,
            json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {"name": name, "arguments": arguments}}),
        )
        .await
    }

    fn tool_text(response: &Value) -> &str {
        response["result"]["content"][0]["text"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let mut server = server();

        let init = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0"}
            }}),
        )
        .await;
        assert_eq!(init["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(init["result"]["serverInfo"]["name"], "Habit Analytics MCP");

        call(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "initialized"})).await;
        assert!(server.is_initialized());

        let list = call(&mut server, json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"})).await;
        let names: Vec<&str> = list["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, vec!["analytics_report", "habit_scores", "snapshot_replace", "snapshot_summary"]);
    }

    #[tokio::test]
    async fn test_replace_then_report() {
        let mut server = server();

        let replaced = call_tool(
            &mut server,
            "snapshot_replace",
            json!({"habits": [habit_json("Walk", 1.0), habit_json("Read", 0.25)]}),
        )
        .await;
        assert_eq!(replaced["result"]["isError"], false);
        assert!(tool_text(&replaced).contains("2 habits"));

        let summary = call_tool(&mut server, "snapshot_summary", json!({})).await;
        assert!(tool_text(&summary).contains("28 score samples"));

        let report = call_tool(&mut server, "analytics_report", json!({})).await;
        assert_eq!(report["result"]["isError"], false);
        let text = tool_text(&report);
        assert!(text.contains("Overall score 62.5/100"));
        assert!(text.contains("\"weekly_breakdown\""));

        let scores = call_tool(
            &mut server,
            "habit_scores",
            json!({"habit": "Walk", "start_date": "2024-04-10", "end_date": "2024-04-14"}),
        )
        .await;
        assert!(tool_text(&scores).contains("Walk: 5 scored days"));
    }

    #[tokio::test]
    async fn test_tool_errors_are_tool_results() {
        let mut server = server();

        let unknown = call_tool(&mut server, "habit_delete", json!({})).await;
        assert_eq!(unknown["result"]["isError"], true);
        assert!(tool_text(&unknown).contains("Unknown tool"));

        let missing = call_tool(&mut server, "habit_scores", json!({"habit": "Nope"})).await;
        assert_eq!(missing["result"]["isError"], true);
        assert!(tool_text(&missing).contains("Habit not found"));

        let bad_date = call_tool(&mut server, "analytics_report", json!({"start_date": "April 1st"})).await;
        assert_eq!(bad_date["result"]["isError"], true);

        // a rejected snapshot leaves the old one in place
        call_tool(&mut server, "snapshot_replace", json!({"habits": [habit_json("Walk", 1.0)]})).await;
        let duplicate = call_tool(
            &mut server,
            "snapshot_replace",
            json!({"habits": [habit_json("Run", 1.0), habit_json("Run", 0.5)]}),
        )
        .await;
        assert_eq!(duplicate["result"]["isError"], true);
        let summary = call_tool(&mut server, "snapshot_summary", json!({})).await;
        assert!(tool_text(&summary).contains("1 habits"));
    }

    fn server_with(window_days: i64, today: NaiveDate) -> McpServer {
        let config = ServerConfig { window_days, today: Some(today) };
        McpServer::new(AnalyticsServer::new(config, SnapshotSet::default()))
    }

    #[tokio::test]
    async fn test_windows_at_calendar_edges() {
        let mut huge = server_with(i64::MAX / 2, NaiveDate::from_ymd_opt(2024, 4, 14).unwrap());
        let report = call_tool(&mut huge, "analytics_report", json!({})).await;
        assert_eq!(report["result"]["isError"], true);
        let explicit = call_tool(&mut huge, "analytics_report", json!({"start_date": "2024-04-01"})).await;
        assert_eq!(explicit["result"]["isError"], false);

        let mut earliest = server_with(13, NaiveDate::MIN);
        let report = call_tool(&mut earliest, "analytics_report", json!({})).await;
        assert_eq!(report["result"]["isError"], true);
        assert!(tool_text(&report).contains("earliest supported date"));

        let mut latest = server_with(13, NaiveDate::MAX);
        let report = call_tool(&mut latest, "analytics_report", json!({})).await;
        assert_eq!(report["result"]["isError"], false);
        assert!(tool_text(&report).contains("\"weekly_breakdown\""));

        let mut server = server();
        let early_end = call_tool(&mut server, "analytics_report", json!({"end_date": "-262143-01-05"})).await;
        assert_eq!(early_end["result"]["isError"], true);
        let last_days = call_tool(
            &mut server,
            "analytics_report",
            json!({"start_date": "+262142-12-30", "end_date": "+262142-12-31"}),
        )
        .await;
        assert_eq!(last_days["result"]["isError"], false);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let mut server = server();

        let raw = server.process_line("{not json").await.unwrap();
        assert_eq!(serde_json::to_value(raw).unwrap()["error"]["code"], -32700);

        let method = call(&mut server, json!({"jsonrpc": "2.0", "id": 1, "method": "habits/delete"})).await;
        assert_eq!(method["error"]["code"], -32601);

        let params = call(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call"})).await;
        assert_eq!(params["error"]["code"], -32602);

        assert!(server.process_line("   \n").await.is_none());
    }

    #[test]
    fn test_blocking_summary_on_empty_server() {
        let mut server = server();
        let summary = tokio_test::block_on(call_tool(&mut server, "snapshot_summary", json!({})));
        assert!(tool_text(&summary).contains("No habits in the snapshot"));
    }
}
