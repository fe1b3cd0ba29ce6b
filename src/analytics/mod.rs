/// Analytics engine for turning habit snapshots into reports
///
/// This module provides the scoring core (advanced score normalization,
/// trends, correlations, streaks, period breakdowns and recommendations)
/// and the report builder that ties them together. Everything in here is a
/// pure function of an immutable snapshot.

pub mod calendar;
pub mod correlation;
pub mod daily;
pub mod normalizer;
pub mod patterns;
pub mod periods;
pub mod recommendations;
pub mod report;
pub mod stats;
pub mod streaks;
pub mod trend;

pub use calendar::CalendarFields;
pub use correlation::{CorrelationAnalyzer, CorrelationKind, HabitCorrelation};
pub use daily::DailyScoreRow;
pub use normalizer::{AdvancedScore, ScoreNormalizer, TrendDirection};
pub use patterns::{PatternAnalyzer, TimePatternAnalysis};
pub use periods::{MonthlyPerformance, PeriodAggregator, WeeklyPerformance};
pub use recommendations::{Priority, Recommendation, RecommendationGenerator, RecommendationType};
pub use report::{AnalyticsReport, ReportBuilder, ReportWindow, DEFAULT_WINDOW_DAYS};
pub use streaks::{StreakAnalysis, StreakAnalyzer};
pub use trend::{TrendAnalysis, TrendAnalyzer};

use chrono::NaiveDate;
use crate::domain::{HabitSnapshot, SnapshotSet};

/// Analytics engine for processing habit snapshots
///
/// The engine holds no habit data of its own; callers hand it a snapshot on
/// every call and get back owned results.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsEngine {
    reports: ReportBuilder,
    normalizer: ScoreNormalizer,
}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the full analytics report for a window
    pub fn generate_report(&self, snapshot: &SnapshotSet, window: ReportWindow) -> AnalyticsReport {
        self.reports.build(snapshot, window)
    }

    /// Advanced score of a habit on `date`, if the habit has a score that day
    ///
    /// Only history up to and including `date` is taken into account.
    pub fn advanced_score(&self, habit: &HabitSnapshot, date: NaiveDate) -> Option<AdvancedScore> {
        let history = habit.scores_through(date);
        let sample = history.last().filter(|s| s.date() == date)?;
        Some(self.normalizer.normalize(sample.value(), habit, date, history))
    }

    /// Per-day score rows of a habit over a window
    pub fn daily_scores(&self, habit: &HabitSnapshot, window: ReportWindow) -> Vec<DailyScoreRow> {
        daily::daily_scores(habit, window.start(), window.end())
    }
}
