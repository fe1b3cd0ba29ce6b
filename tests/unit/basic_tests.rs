/// Basic unit tests to verify core functionality
use chrono::{Duration, NaiveDate};
use habit_analytics_mcp::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_habit_snapshot_creation() {
        let habit = HabitSnapshot::new("Morning Run", Frequency::new(3, 7).unwrap());

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.name(), "Morning Run");
        assert!(!habit.is_archived());
        assert!(!habit.is_numerical());
        assert!(habit.scores().is_empty());
        assert_eq!(habit.current_streak(), 0);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            HabitSnapshot::new("   ", Frequency::DAILY),
            Err(DomainError::InvalidHabitName(_))
        ));
        assert!(matches!(Frequency::new(1, 0), Err(DomainError::InvalidFrequency(_))));
        assert!(ScoreSample::new(day(0), 1.5).is_err());
        assert!(ScoreSample::new(day(0), f64::NAN).is_err());
        assert!(Entry::new(day(0), f64::INFINITY, None).is_err());
        assert!(Streak::new(day(5), day(4)).is_err());
    }

    #[test]
    fn test_numerical_completion_uses_target() {
        let habit = HabitSnapshot::new("Pages", Frequency::DAILY)
            .unwrap()
            .numerical(20.0)
            .unwrap()
            .with_unit("pages");

        let short = Entry::new(day(0), 12.0, None).unwrap();
        let enough = Entry::new(day(1), 20.0, Some("Finished a chapter".to_string())).unwrap();

        assert!(!habit.is_completed(&short));
        assert!(habit.is_completed(&enough));
        assert_eq!(habit.entry_signal(&short), 12.0);
        assert!(enough.has_notes());
        assert_eq!(habit.unit(), Some("pages"));
    }

    #[test]
    fn test_derived_streaks_are_most_recent_first() {
        let done = [true, true, true, false, true, true];
        let entries = done
            .iter()
            .enumerate()
            .map(|(i, d)| Entry::check(day(i as i64), *d))
            .collect();

        let habit = HabitSnapshot::new("Floss", Frequency::DAILY)
            .unwrap()
            .with_entries(entries)
            .with_derived_streaks();

        let lengths: Vec<u32> = habit.streaks().iter().map(|s| s.length()).collect();
        assert_eq!(lengths, vec![2, 3]);
        assert_eq!(habit.current_streak(), 2);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let a = HabitSnapshot::new("Read", Frequency::DAILY).unwrap();
        let b = HabitSnapshot::new("Read", Frequency::WEEKLY).unwrap();
        assert!(matches!(
            SnapshotSet::new(vec![a, b]),
            Err(DomainError::DuplicateHabitName(_))
        ));
    }

    #[test]
    fn test_snapshot_lookup_by_name_and_id() {
        let id = HabitId::new();
        let habit = HabitSnapshot::new("Stretch", Frequency::DAILY).unwrap().with_id(id.clone());
        let snapshot = SnapshotSet::new(vec![habit]).unwrap();

        assert!(snapshot.find("Stretch").is_some());
        assert!(snapshot.find(&id.to_string()).is_some());
        assert!(snapshot.find("Missing").is_none());
    }

    #[test]
    fn test_report_window_rules() {
        assert!(matches!(
            ReportWindow::new(day(10), day(9)),
            Err(DomainError::InvalidDateRange(_))
        ));

        let window = ReportWindow::ending_on(day(30), 30).unwrap();
        assert_eq!(window.start(), day(0));
        assert_eq!(window.end(), day(30));

        let config = ServerConfig {
            window_days: 7,
            today: Some(day(14)),
        };
        assert_eq!(config.default_window().unwrap().start(), day(7));
        assert_eq!(ServerConfig::default().window_days, DEFAULT_WINDOW_DAYS);
    }

    #[test]
    fn test_advanced_score_through_engine() {
        let scores = (0..10).map(|i| ScoreSample::new(day(i), 0.6).unwrap()).collect();
        let habit = HabitSnapshot::new("Meditate", Frequency::DAILY)
            .unwrap()
            .with_scores(scores);

        let engine = AnalyticsEngine::new();
        let score = engine.advanced_score(&habit, day(9)).unwrap();

        // flat history: fully consistent, no streak, no movement
        assert!((score.daily_score - (60.0 * 0.7 + 100.0 * 0.2)).abs() < 1e-9);
        assert!((score.weekly_score - 60.0).abs() < 1e-9);
        assert_eq!(score.trend_direction, TrendDirection::Stable);
        assert_eq!(score.velocity_score, 0.0);
        assert!(engine.advanced_score(&habit, day(20)).is_none());
    }
}
