/// Trend analysis over the pooled score series of all tracked habits
///
/// Callers pool the 0-100 scores habit by habit, each habit's scores oldest
/// first. Only the suffix of the pooled list matters for the moving
/// averages, so the most recently appended habit dominates short windows.

use serde::{Deserialize, Serialize};

use crate::analytics::normalizer::TrendDirection;
use crate::analytics::stats::{before_last, last_n, mean, steadiness};

/// Moving averages, direction and steadiness of a score series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub moving_average_7: f64,
    pub moving_average_30: f64,
    pub moving_average_90: f64,
    pub overall_trend: TrendDirection,
    /// Week-over-week change in percent, -100..100
    pub improvement_rate: f64,
    /// 0-100, higher means more consistent
    pub volatility: f64,
}

impl Default for TrendAnalysis {
    fn default() -> Self {
        Self {
            moving_average_7: 0.0,
            moving_average_30: 0.0,
            moving_average_90: 0.0,
            overall_trend: TrendDirection::Stable,
            improvement_rate: 0.0,
            volatility: 0.0,
        }
    }
}

/// Computes trend statistics from a pooled score series
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, scores: &[f64]) -> TrendAnalysis {
        if scores.is_empty() {
            return TrendAnalysis::default();
        }

        let moving_average_7 = Self::moving_average(scores, 7);
        let moving_average_30 = Self::moving_average(scores, 30);
        let moving_average_90 = Self::moving_average(scores, 90);

        TrendAnalysis {
            moving_average_7,
            moving_average_30,
            moving_average_90,
            overall_trend: TrendDirection::compare(moving_average_7, moving_average_30),
            improvement_rate: Self::improvement_rate(scores),
            volatility: Self::volatility(scores),
        }
    }

    /// Average of the last `window` values, or of all values when shorter
    pub fn moving_average(scores: &[f64], window: usize) -> f64 {
        mean(last_n(scores, window))
    }

    /// Percent change of the last 7 values against the 7 before them
    pub fn improvement_rate(scores: &[f64]) -> f64 {
        if scores.len() < 14 {
            return 0.0;
        }

        let recent = mean(last_n(scores, 7));
        let previous = mean(before_last(scores, 7, 7));
        if previous == 0.0 {
            return 0.0;
        }

        ((recent - previous) / previous * 100.0).clamp(-100.0, 100.0)
    }

    /// Steadiness of the whole series; 0.0 when empty
    pub fn volatility(scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        steadiness(scores)
    }
}
