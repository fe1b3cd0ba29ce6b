/// Loading snapshots from JSON files and reporting on them
use std::io::Write;

use chrono::NaiveDate;
use habit_analytics_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod snapshot_file_tests {
    use super::*;

    fn write_snapshot(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(json.as_bytes()).expect("Failed to write snapshot");
        file
    }

    fn week_of_scores(name: &str, value: f64) -> String {
        let scores = (1..=7)
            .map(|d| format!(r#"{{"date": "2024-02-{:02}", "value": {}}}"#, d, value))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            r#"{{"name": "{}", "frequency": {{"numerator": 1, "denominator": 1}}, "scores": [{}]}}"#,
            name, scores
        )
    }

    #[test]
    fn test_server_reports_on_loaded_file() {
        let json = format!(
            r#"{{"habits": [{}, {}]}}"#,
            week_of_scores("Walk", 1.0),
            week_of_scores("Stretch", 0.5)
        );
        let file = write_snapshot(&json);

        let config = ServerConfig {
            window_days: 6,
            today: NaiveDate::from_ymd_opt(2024, 2, 7),
        };
        let server = AnalyticsServer::from_source(config, &JsonSnapshotFile::new(file.path()))
            .expect("Failed to create server");

        assert_eq!(server.source().snapshot().len(), 2);

        let report = server.default_report().expect("Failed to build report");
        assert_eq!(report.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(report.overall_score, 75.0);
        assert_eq!(report.weekly_breakdown.len(), 1);
        assert_eq!(report.weekly_breakdown[0].best_habit, "Walk");
        assert_eq!(report.weekly_breakdown[0].worst_habit, "Stretch");
    }

    #[test]
    fn test_report_serializes_with_upper_case_enums() {
        let file = write_snapshot(&format!(r#"{{"habits": [{}]}}"#, week_of_scores("Walk", 0.25)));
        let snapshot = JsonSnapshotFile::new(file.path()).load_snapshot().unwrap();

        let window = ReportWindow::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 7).unwrap(),
        )
        .unwrap();
        let report = AnalyticsEngine::new().generate_report(&snapshot, window);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["trend_analysis"]["overall_trend"], "STABLE");
        assert_eq!(value["recommendations"][0]["priority"], "HIGH");
        assert_eq!(value["start_date"], "2024-02-01");
    }

    #[test]
    fn test_invalid_file_fails_to_load() {
        let file = write_snapshot(r#"{"habits": [{"name": "", "frequency": {"numerator": 1, "denominator": 1}}]}"#);
        let result = AnalyticsServer::from_source(ServerConfig::default(), &JsonSnapshotFile::new(file.path()));
        assert!(matches!(result, Err(ServerError::Snapshot(SnapshotError::Json(_)))));

        let missing = JsonSnapshotFile::new("/nonexistent/snapshot.json");
        assert!(matches!(missing.load_snapshot(), Err(SnapshotError::Io(_))));
    }
}
