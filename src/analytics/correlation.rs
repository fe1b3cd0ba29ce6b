/// Pairwise correlation between habits
///
/// For every unordered pair of habits the entries on days both habits have
/// logged are compared with the Pearson coefficient. Cost is O(H² × D) for H
/// habits and D days in the window, which is fine for a few dozen habits but
/// grows quickly beyond that.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use tracing::trace;

use crate::domain::HabitSnapshot;

/// Pairs with fewer overlapping days than this are not compared
pub const MIN_OVERLAP_DAYS: usize = 7;

/// Only correlations stronger than this (in absolute value) are reported
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.3;

/// Qualitative bucket of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrelationKind {
    StrongPositive,
    ModeratePositive,
    StrongNegative,
    ModerateNegative,
    Weak,
}

impl CorrelationKind {
    pub fn classify(strength: f64) -> Self {
        if strength > 0.7 {
            CorrelationKind::StrongPositive
        } else if strength > 0.3 {
            CorrelationKind::ModeratePositive
        } else if strength < -0.7 {
            CorrelationKind::StrongNegative
        } else if strength < -0.3 {
            CorrelationKind::ModerateNegative
        } else {
            CorrelationKind::Weak
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CorrelationKind::StrongPositive => "Strong positive correlation - these habits are often done together",
            CorrelationKind::ModeratePositive => "Moderate positive correlation - some tendency to do together",
            CorrelationKind::StrongNegative => "Strong negative correlation - these habits rarely coincide",
            CorrelationKind::ModerateNegative => "Moderate negative correlation - some tendency to avoid doing together",
            CorrelationKind::Weak => "Weak correlation",
        }
    }
}

/// A significant correlation between two habits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCorrelation {
    pub habit_a: String,
    pub habit_b: String,
    /// Pearson coefficient, -1..1
    pub strength: f64,
    pub kind: CorrelationKind,
    pub description: String,
}

/// Finds correlated habit pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Significant correlations among `habits`, strongest first
    pub fn analyze(
        &self,
        habits: &[&HabitSnapshot],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<HabitCorrelation> {
        let signals: Vec<BTreeMap<NaiveDate, f64>> = habits
            .iter()
            .map(|habit| Self::daily_signal(habit, start, end))
            .collect();

        let mut correlations = Vec::new();

        for i in 0..habits.len() {
            for j in (i + 1)..habits.len() {
                let Some(strength) = Self::correlate(&signals[i], &signals[j]) else {
                    trace!(
                        "Skipping {} / {}: fewer than {} shared days",
                        habits[i].name(),
                        habits[j].name(),
                        MIN_OVERLAP_DAYS
                    );
                    continue;
                };

                if strength.abs() <= SIGNIFICANCE_THRESHOLD {
                    continue;
                }

                let kind = CorrelationKind::classify(strength);
                correlations.push(HabitCorrelation {
                    habit_a: habits[i].name().to_string(),
                    habit_b: habits[j].name().to_string(),
                    strength,
                    kind,
                    description: kind.description().to_string(),
                });
            }
        }

        correlations.sort_by(|a, b| b.strength.abs().total_cmp(&a.strength.abs()));
        correlations
    }

    /// Correlation between two habits over their shared days in the window
    ///
    /// Returns `None` when they share fewer than [`MIN_OVERLAP_DAYS`] days.
    /// The result does not depend on argument order.
    pub fn correlation_between(
        a: &HabitSnapshot,
        b: &HabitSnapshot,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<f64> {
        Self::correlate(
            &Self::daily_signal(a, start, end),
            &Self::daily_signal(b, start, end),
        )
    }

    /// Entry signal per day; the first entry wins when a day repeats
    fn daily_signal(habit: &HabitSnapshot, start: NaiveDate, end: NaiveDate) -> BTreeMap<NaiveDate, f64> {
        let mut signal = BTreeMap::new();
        for entry in habit.entries_between(start, end) {
            signal.entry(entry.date).or_insert_with(|| habit.entry_signal(entry));
        }
        signal
    }

    fn correlate(a: &BTreeMap<NaiveDate, f64>, b: &BTreeMap<NaiveDate, f64>) -> Option<f64> {
        // Shared days in calendar order, whichever side is iterated
        let (xs, ys): (Vec<f64>, Vec<f64>) = a
            .iter()
            .filter_map(|(date, x)| b.get(date).map(|y| (*x, *y)))
            .unzip();

        if xs.len() < MIN_OVERLAP_DAYS {
            return None;
        }

        Some(pearson(&xs, &ys))
    }
}

/// Pearson correlation coefficient; 0.0 for mismatched, empty or constant input
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0)
}
