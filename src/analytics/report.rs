/// Report assembly over a date window
///
/// ReportBuilder runs every analyzer once over the non-archived habits of a
/// snapshot and bundles the results. It keeps no state between calls, so the
/// same snapshot and window always produce the same report.

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, TimeDelta};
use tracing::{debug, info};

use crate::analytics::calendar::days_between;
use crate::analytics::correlation::{CorrelationAnalyzer, HabitCorrelation};
use crate::analytics::patterns::{PatternAnalyzer, TimePatternAnalysis};
use crate::analytics::periods::{MonthlyPerformance, PeriodAggregator, WeeklyPerformance};
use crate::analytics::recommendations::{Recommendation, RecommendationGenerator};
use crate::analytics::stats::{mean, percents};
use crate::analytics::streaks::{StreakAnalysis, StreakAnalyzer};
use crate::analytics::trend::{TrendAnalysis, TrendAnalyzer};
use crate::domain::{DomainError, HabitSnapshot, SnapshotSet};

/// Default report length in days, counted back from the end date
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// Habits expected less often than this per day still get this weight
pub const MIN_HABIT_WEIGHT: f64 = 0.1;

/// Inclusive date range a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    /// Create a window, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDateRange(
                format!("Window start {} is after its end {}", start, end)
            ));
        }
        Ok(Self { start, end })
    }

    /// The `days` days before `end` through `end` itself
    ///
    /// Fails when `days` is negative or the start would fall outside the
    /// supported calendar range.
    pub fn ending_on(end: NaiveDate, days: i64) -> Result<Self, DomainError> {
        if days < 0 {
            return Err(DomainError::InvalidDateRange(
                format!("Window length must not be negative, got {}", days)
            ));
        }

        let start = TimeDelta::try_days(days)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| DomainError::InvalidDateRange(
                format!("A {}-day window ending {} starts before the earliest supported date", days, end)
            ))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Everything the analytics engine knows about a set of habits over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Frequency-weighted average habit score, 0-100
    pub overall_score: f64,
    pub trend_analysis: TrendAnalysis,
    pub habit_correlations: Vec<HabitCorrelation>,
    pub time_patterns: TimePatternAnalysis,
    pub streak_analysis: StreakAnalysis,
    pub recommendations: Vec<Recommendation>,
    pub weekly_breakdown: Vec<WeeklyPerformance>,
    pub monthly_breakdown: Vec<MonthlyPerformance>,
}

/// Runs every analyzer and assembles the report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    trends: TrendAnalyzer,
    correlations: CorrelationAnalyzer,
    patterns: PatternAnalyzer,
    streaks: StreakAnalyzer,
    recommendations: RecommendationGenerator,
    periods: PeriodAggregator,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the report for the non-archived habits of `snapshot`
    pub fn build(&self, snapshot: &SnapshotSet, window: ReportWindow) -> AnalyticsReport {
        let habits = snapshot.active();
        let (start, end) = (window.start(), window.end());

        debug!(
            "Generating report for {} habits from {} to {} ({} days)",
            habits.len(),
            start,
            end,
            days_between(start, end) + 1
        );

        let report = AnalyticsReport {
            start_date: start,
            end_date: end,
            overall_score: Self::overall_score(&habits, start, end),
            trend_analysis: self.trends.analyze(&Self::pooled_scores(&habits, start, end)),
            habit_correlations: self.correlations.analyze(&habits, start, end),
            time_patterns: self.patterns.analyze(&habits, start, end),
            streak_analysis: self.streaks.analyze(&habits),
            recommendations: self.recommendations.generate(&habits, start, end),
            weekly_breakdown: self.periods.weekly(&habits, start, end),
            monthly_breakdown: self.periods.monthly(&habits, start, end),
        };

        info!(
            "Report ready: overall {:.1}, trend {}, {} correlations, {} recommendations",
            report.overall_score,
            report.trend_analysis.overall_trend.as_str(),
            report.habit_correlations.len(),
            report.recommendations.len()
        );

        report
    }

    /// Frequency-weighted mean of each habit's average score in the window
    pub fn overall_score(habits: &[&HabitSnapshot], start: NaiveDate, end: NaiveDate) -> f64 {
        if habits.is_empty() {
            return 0.0;
        }

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for habit in habits {
            let average = mean(&percents(habit.scores_between(start, end)));
            let weight = habit.frequency().per_day().max(MIN_HABIT_WEIGHT);
            weighted_sum += average * weight;
            total_weight += weight;
        }

        (weighted_sum / total_weight).clamp(0.0, 100.0)
    }

    /// Window scores of all habits, habit by habit, each oldest first
    pub fn pooled_scores(habits: &[&HabitSnapshot], start: NaiveDate, end: NaiveDate) -> Vec<f64> {
        habits
            .iter()
            .flat_map(|habit| percents(habit.scores_between(start, end)))
            .collect()
    }
}
