/// Weekly and monthly breakdowns of habit scores
///
/// Buckets start at the window's start date and step forward in fixed
/// increments until they pass the end date. A "month" here is a fixed 30-day
/// bucket, not a calendar month, so bucket boundaries drift against the
/// calendar. The last bucket keeps its full span even when it runs past the
/// window's end date.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::analytics::calendar::add_days;
use crate::analytics::stats::{mean, percents};
use crate::analytics::trend::TrendAnalyzer;
use crate::domain::HabitSnapshot;

pub const WEEK_DAYS: i64 = 7;

/// Length of the fixed-size "month" bucket
pub const MONTH_DAYS: i64 = 30;

/// Name reported for best/worst habit when there are no habits
pub const NO_HABIT: &str = "None";

/// Scores of all habits during one 7-day bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPerformance {
    pub week_start: NaiveDate,
    /// Last day of the bucket, inclusive
    pub week_end: NaiveDate,
    /// Average of the per-habit averages, 0-100
    pub overall_score: f64,
    pub habit_scores: BTreeMap<String, f64>,
    pub best_habit: String,
    pub worst_habit: String,
}

/// Scores of all habits during one 30-day bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub month_start: NaiveDate,
    /// Last day of the bucket, inclusive
    pub month_end: NaiveDate,
    pub overall_score: f64,
    pub habit_scores: BTreeMap<String, f64>,
    pub best_habit: String,
    pub worst_habit: String,
    /// Change of overall score against the previous bucket, in points
    pub improvement: f64,
    /// Steadiness of every score in the bucket, 0-100
    pub consistency: f64,
}

/// Per-bucket numbers shared by the weekly and monthly views
struct Bucket {
    start: NaiveDate,
    end: NaiveDate,
    /// In habit order
    averages: Vec<(String, f64)>,
    pooled: Vec<f64>,
}

impl Bucket {
    fn collect(habits: &[&HabitSnapshot], start: NaiveDate, end: NaiveDate) -> Self {
        let mut averages = Vec::with_capacity(habits.len());
        let mut pooled = Vec::new();

        for habit in habits {
            let values = percents(habit.scores_between(start, end));
            averages.push((habit.name().to_string(), mean(&values)));
            pooled.extend(values);
        }

        Self { start, end, averages, pooled }
    }

    fn overall_score(&self) -> f64 {
        let values: Vec<f64> = self.averages.iter().map(|(_, v)| *v).collect();
        mean(&values)
    }

    /// First habit with the highest average
    fn best_habit(&self) -> String {
        let mut best: Option<&(String, f64)> = None;
        for item in &self.averages {
            if best.map_or(true, |b| item.1 > b.1) {
                best = Some(item);
            }
        }
        best.map_or_else(|| NO_HABIT.to_string(), |b| b.0.clone())
    }

    /// First habit with the lowest average
    fn worst_habit(&self) -> String {
        let mut worst: Option<&(String, f64)> = None;
        for item in &self.averages {
            if worst.map_or(true, |w| item.1 < w.1) {
                worst = Some(item);
            }
        }
        worst.map_or_else(|| NO_HABIT.to_string(), |w| w.0.clone())
    }

    fn habit_scores(&self) -> BTreeMap<String, f64> {
        self.averages.iter().cloned().collect()
    }
}

/// Builds the weekly and monthly breakdowns
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodAggregator;

impl PeriodAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Start dates of the fixed-size buckets covering [start, end]
    pub fn bucket_starts(start: NaiveDate, end: NaiveDate, step_days: i64) -> Vec<NaiveDate> {
        let mut starts = Vec::new();
        let mut current = start;
        while current <= end {
            starts.push(current);
            match add_days(current, step_days) {
                Some(next) => current = next,
                None => break,
            }
        }
        starts
    }

    /// Last day of a bucket, cut short at the end of the calendar
    fn bucket_end(bucket_start: NaiveDate, span_days: i64) -> NaiveDate {
        add_days(bucket_start, span_days - 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn weekly(&self, habits: &[&HabitSnapshot], start: NaiveDate, end: NaiveDate) -> Vec<WeeklyPerformance> {
        Self::bucket_starts(start, end, WEEK_DAYS)
            .into_iter()
            .map(|week_start| {
                let bucket = Bucket::collect(habits, week_start, Self::bucket_end(week_start, WEEK_DAYS));
                WeeklyPerformance {
                    week_start: bucket.start,
                    week_end: bucket.end,
                    overall_score: bucket.overall_score(),
                    habit_scores: bucket.habit_scores(),
                    best_habit: bucket.best_habit(),
                    worst_habit: bucket.worst_habit(),
                }
            })
            .collect()
    }

    pub fn monthly(&self, habits: &[&HabitSnapshot], start: NaiveDate, end: NaiveDate) -> Vec<MonthlyPerformance> {
        let mut months: Vec<MonthlyPerformance> = Vec::new();

        for month_start in Self::bucket_starts(start, end, MONTH_DAYS) {
            let bucket = Bucket::collect(habits, month_start, Self::bucket_end(month_start, MONTH_DAYS));
            let overall_score = bucket.overall_score();
            let improvement = months
                .last()
                .map_or(0.0, |previous| (overall_score - previous.overall_score).clamp(-100.0, 100.0));

            months.push(MonthlyPerformance {
                month_start: bucket.start,
                month_end: bucket.end,
                overall_score,
                habit_scores: bucket.habit_scores(),
                best_habit: bucket.best_habit(),
                worst_habit: bucket.worst_habit(),
                improvement,
                consistency: TrendAnalyzer::volatility(&bucket.pooled),
            });
        }

        months
    }
}
