/// End-to-end report scenarios over hand-built snapshots
use chrono::{Duration, NaiveDate};
use habit_analytics_mcp::analytics::{CorrelationKind, Priority, RecommendationType};
use habit_analytics_mcp::*;

#[cfg(test)]
mod report_scenario_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-9;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    }

    fn window(first: i64, last: i64) -> ReportWindow {
        ReportWindow::new(day(first), day(last)).unwrap()
    }

    /// Habit with one score sample per value, starting at day 0
    fn scored(name: &str, values: &[f64]) -> HabitSnapshot {
        let scores = values
            .iter()
            .enumerate()
            .map(|(i, v)| ScoreSample::new(day(i as i64), *v).unwrap())
            .collect();
        HabitSnapshot::new(name, Frequency::DAILY).unwrap().with_scores(scores)
    }

    #[test]
    fn test_empty_snapshot_report() {
        let report = AnalyticsEngine::new().generate_report(&SnapshotSet::default(), window(0, 13));

        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.trend_analysis.overall_trend, TrendDirection::Stable);
        assert!(report.habit_correlations.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.streak_analysis.longest_overall_streak, 0);
    }

    #[test]
    fn test_two_week_window_has_two_weekly_buckets() {
        let snapshot = SnapshotSet::new(vec![scored("Walk", &[0.5; 14])]).unwrap();
        let report = AnalyticsEngine::new().generate_report(&snapshot, window(0, 13));

        assert_eq!(report.weekly_breakdown.len(), 2);
        assert_eq!(report.weekly_breakdown[0].week_start, day(0));
        assert_eq!(report.weekly_breakdown[0].week_end, day(6));
        assert_eq!(report.weekly_breakdown[1].week_start, day(7));
        assert_eq!(report.weekly_breakdown[1].habit_scores.get("Walk"), Some(&50.0));
        assert_eq!(report.weekly_breakdown[1].best_habit, "Walk");
        assert_eq!(report.overall_score, 50.0);
    }

    #[test]
    fn test_identical_habits_correlate_strongly() {
        // 14 dense days, 10 of them done, same pattern for both habits
        let pattern = [true, true, false, true, true, true, false, true, true, false, true, true, false, true];
        let entries: Vec<Entry> = pattern
            .iter()
            .enumerate()
            .map(|(i, done)| Entry::check(day(i as i64), *done))
            .collect();
        assert_eq!(pattern.iter().filter(|d| **d).count(), 10);

        let a = scored("Read", &[0.5; 14]).with_entries(entries.clone());
        let b = scored("Journal", &[0.5; 14]).with_entries(entries);
        let snapshot = SnapshotSet::new(vec![a, b]).unwrap();

        let report = AnalyticsEngine::new().generate_report(&snapshot, window(0, 13));
        assert_eq!(report.habit_correlations.len(), 1);

        let correlation = &report.habit_correlations[0];
        assert!((correlation.strength - 1.0).abs() < EPS);
        assert_eq!(correlation.kind, CorrelationKind::StrongPositive);
        assert_eq!(correlation.habit_a, "Read");
        assert_eq!(correlation.habit_b, "Journal");
    }

    #[test]
    fn test_too_little_overlap_gives_no_correlation() {
        let entries: Vec<Entry> = (0..6).map(|i| Entry::check(day(i), i % 2 == 0)).collect();
        let a = scored("A", &[0.5; 6]).with_entries(entries.clone());
        let b = scored("B", &[0.5; 6]).with_entries(entries);
        let snapshot = SnapshotSet::new(vec![a, b]).unwrap();

        let report = AnalyticsEngine::new().generate_report(&snapshot, window(0, 5));
        assert!(report.habit_correlations.is_empty());
    }

    #[test]
    fn test_perfect_month_advanced_score() {
        let entries = (0..30).map(|i| Entry::check(day(i), true)).collect();
        let habit = scored("Water", &[1.0; 30])
            .with_entries(entries)
            .with_derived_streaks();
        assert_eq!(habit.current_streak(), 30);

        let score = AnalyticsEngine::new().advanced_score(&habit, day(29)).unwrap();

        // 100 * 0.7 + 100 * 0.2 + 10 * 0.1
        assert!((score.daily_score - 91.0).abs() < EPS);
        assert!((score.weekly_score - 100.0).abs() < EPS);
        assert!((score.monthly_score - 100.0).abs() < EPS);
        assert!((score.consistency_score - 100.0).abs() < EPS);
        assert_eq!(score.streak_bonus, 10.0);
        assert_eq!(score.trend_direction, TrendDirection::Stable);

        let snapshot = SnapshotSet::new(vec![habit]).unwrap();
        let report = AnalyticsEngine::new().generate_report(&snapshot, window(0, 29));
        assert_eq!(report.monthly_breakdown.len(), 1);
        assert_eq!(report.monthly_breakdown[0].overall_score, 100.0);
        assert_eq!(report.streak_analysis.longest_overall_streak, 30);
    }

    #[test]
    fn test_thirty_five_day_streak_bonus() {
        let habit = scored("Run", &[0.8; 35]).with_streaks(vec![Streak::new(day(0), day(34)).unwrap()]);
        let score = AnalyticsEngine::new().advanced_score(&habit, day(34)).unwrap();
        assert_eq!(score.streak_bonus, 10.0);
    }

    #[test]
    fn test_low_average_gets_one_high_priority_focus() {
        let snapshot = SnapshotSet::new(vec![scored("Piano", &[0.25; 10])]).unwrap();
        let report = AnalyticsEngine::new().generate_report(&snapshot, window(0, 9));

        assert_eq!(report.recommendations.len(), 1);
        let recommendation = &report.recommendations[0];
        assert_eq!(recommendation.kind, RecommendationType::FocusHabit);
        assert_eq!(recommendation.priority, Priority::High);
        assert_eq!(recommendation.habit_name.as_deref(), Some("Piano"));
        assert!(recommendation.message.contains("25%"));
    }

    #[test]
    fn test_recommendations_are_ordered_by_priority() {
        let snapshot = SnapshotSet::new(vec![
            scored("Excellent", &[1.0; 10]),
            scored("Struggling", &[0.25; 10]),
            scored("Fine", &[0.75; 10]),
        ])
        .unwrap();
        let report = AnalyticsEngine::new().generate_report(&snapshot, window(0, 9));

        let kinds: Vec<RecommendationType> = report.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RecommendationType::FocusHabit, RecommendationType::GoalAdjustment]
        );
    }

    #[test]
    fn test_overall_score_stays_in_range() {
        let snapshot = SnapshotSet::new(vec![
            scored("A", &[0.0, 0.1, 0.9, 1.0, 0.3, 0.7, 0.2]),
            scored("B", &[1.0; 7]).archived(),
            HabitSnapshot::new("C", Frequency::new(1, 30).unwrap()).unwrap(),
        ])
        .unwrap();
        let report = AnalyticsEngine::new().generate_report(&snapshot, window(0, 6));

        assert!((0.0..=100.0).contains(&report.overall_score));
        for week in &report.weekly_breakdown {
            assert!((0.0..=100.0).contains(&week.overall_score));
        }
    }

    #[test]
    fn test_daily_projection_rows() {
        let entries = (0..3).map(|i| Entry::check(day(i), i != 1)).collect();
        let habit = scored("Yoga", &[0.5, 0.25, 0.75]).with_entries(entries);

        let rows = AnalyticsEngine::new().daily_scores(&habit, window(0, 2));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].is_completed, false);
        assert_eq!(rows[2].score.raw_score, 0.75);
        // 2024-01-01 is a Monday
        assert_eq!(rows[0].calendar.day_of_week, 1);
        assert_eq!(rows[0].calendar.quarter, 1);
    }
}
