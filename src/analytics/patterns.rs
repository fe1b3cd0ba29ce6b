/// Day-of-week and seasonal aggregation of scores
///
/// This sits beside the scoring core: it only regroups scores that already
/// exist, by the weekday and season of the days that have entries.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate};

use crate::analytics::calendar::{is_weekend, season};
use crate::analytics::stats::mean;
use crate::domain::HabitSnapshot;

/// Reported for best/worst day when no entry has a score
pub const UNKNOWN_DAY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePatternAnalysis {
    pub best_day_of_week: String,
    pub worst_day_of_week: String,
    /// Average 0-100 score per season name
    pub seasonal_scores: BTreeMap<String, f64>,
    pub weekend_score: f64,
    pub weekday_score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, habits: &[&HabitSnapshot], start: NaiveDate, end: NaiveDate) -> TimePatternAnalysis {
        // Monday first, so ties resolve to the earlier weekday
        let mut by_weekday: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        let mut by_season: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        let mut weekend = Vec::new();
        let mut weekday = Vec::new();

        for habit in habits {
            for entry in habit.entries_between(start, end) {
                // An entry day without a score sample counts as 0
                let score = habit
                    .scores_between(entry.date, entry.date)
                    .first()
                    .map_or(0.0, |sample| sample.percent());

                by_weekday
                    .entry(entry.date.weekday().num_days_from_monday())
                    .or_default()
                    .push(score);
                by_season
                    .entry(season(entry.date).to_string())
                    .or_default()
                    .push(score);

                if is_weekend(entry.date) {
                    weekend.push(score);
                } else {
                    weekday.push(score);
                }
            }
        }

        let averages: Vec<(u32, f64)> = by_weekday
            .iter()
            .map(|(day, scores)| (*day, mean(scores)))
            .collect();

        let mut best: Option<(u32, f64)> = None;
        let mut worst: Option<(u32, f64)> = None;
        for &(day, avg) in &averages {
            if best.map_or(true, |(_, b)| avg > b) {
                best = Some((day, avg));
            }
            if worst.map_or(true, |(_, w)| avg < w) {
                worst = Some((day, avg));
            }
        }

        TimePatternAnalysis {
            best_day_of_week: best.map_or(UNKNOWN_DAY.to_string(), |(d, _)| weekday_name(d)),
            worst_day_of_week: worst.map_or(UNKNOWN_DAY.to_string(), |(d, _)| weekday_name(d)),
            seasonal_scores: by_season
                .into_iter()
                .map(|(name, scores)| (name, mean(&scores)))
                .collect(),
            weekend_score: mean(&weekend),
            weekday_score: mean(&weekday),
        }
    }
}

fn weekday_name(days_from_monday: u32) -> String {
    match days_from_monday {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    }
    .to_string()
}
