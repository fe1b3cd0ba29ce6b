/// Unit tests for snapshot parsing and the in-memory source
use habit_analytics_mcp::snapshot::parse_snapshot;
use habit_analytics_mcp::*;

#[cfg(test)]
mod snapshot_unit_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SNAPSHOT: &str = r#"{
        "habits": [
            {
                "name": "Walk",
                "frequency": {"numerator": 1, "denominator": 1},
                "scores": [
                    {"date": "2024-05-02", "value": 0.5},
                    {"date": "2024-05-01", "value": 0.25}
                ],
                "entries": [
                    {"date": "2024-05-01", "value": 1.0},
                    {"date": "2024-05-02", "value": 1.0, "notes": "Long one"}
                ]
            },
            {
                "name": "Old habit",
                "frequency": {"numerator": 1, "denominator": 7},
                "is_archived": true
            }
        ]
    }"#;

    #[test]
    fn test_parse_sorts_and_derives_streaks() {
        let snapshot = parse_snapshot(SNAPSHOT).expect("snapshot should parse");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.active().len(), 1);

        let walk = snapshot.find("Walk").unwrap();
        let values: Vec<f64> = walk.scores().iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![0.25, 0.5]);
        // no streaks in the file, so they come from the two completed days
        assert_eq!(walk.current_streak(), 2);
        assert_eq!(walk.entries()[1].notes.as_deref(), Some("Long one"));
    }

    #[test]
    fn test_invalid_snapshots_are_rejected() {
        let zero_denominator = r#"{"habits": [{"name": "X", "frequency": {"numerator": 1, "denominator": 0}}]}"#;
        assert!(matches!(parse_snapshot(zero_denominator), Err(SnapshotError::Json(_))));

        let bad_score = r#"{"habits": [{"name": "X", "frequency": {"numerator": 1, "denominator": 1},
            "scores": [{"date": "2024-01-01", "value": 2.0}]}]}"#;
        assert!(parse_snapshot(bad_score).is_err());

        let duplicate = r#"{"habits": [
            {"name": "X", "frequency": {"numerator": 1, "denominator": 1}},
            {"name": "X", "frequency": {"numerator": 1, "denominator": 1}}
        ]}"#;
        assert!(parse_snapshot(duplicate).is_err());

        assert!(parse_snapshot("not json").is_err());
    }

    #[test]
    fn test_serialized_snapshot_parses_back() {
        let snapshot = parse_snapshot(SNAPSHOT).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(parse_snapshot(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_memory_source_replace() {
        let mut source = MemorySnapshotSource::default();
        assert!(source.load_snapshot().unwrap().is_empty());

        let previous = source.replace(parse_snapshot(SNAPSHOT).unwrap());
        assert!(previous.is_empty());
        assert_eq!(source.load_snapshot().unwrap().len(), 2);
    }
}
