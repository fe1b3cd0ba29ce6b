/// Integration tests: end-to-end reports, snapshot files and the MCP server
mod report_scenarios;
mod snapshot_files;
mod mcp_requests;
