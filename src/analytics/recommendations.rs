/// Rule-based recommendations per habit
///
/// Each habit with at least one score in the window is checked against an
/// ordered list of rules; the first rule that matches produces that habit's
/// only recommendation.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::analytics::stats::{last_n, mean, percents};
use crate::domain::HabitSnapshot;

/// What a recommendation asks the user to do
///
/// Only `FocusHabit`, `StreakRecovery` and `GoalAdjustment` are produced by
/// the current rules; the others are part of the report vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    FocusHabit,
    ReduceHabit,
    TimingOptimization,
    StreakRecovery,
    ConsistencyImprovement,
    GoalAdjustment,
}

/// Ordered most urgent first, so sorting ascending puts HIGH on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationType,
    pub message: String,
    pub priority: Priority,
    pub habit_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Recommendations for every habit, HIGH priority first
    pub fn generate(
        &self,
        habits: &[&HabitSnapshot],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = habits
            .iter()
            .filter_map(|habit| {
                let values = percents(habit.scores_between(start, end));
                if values.is_empty() {
                    return None;
                }
                Self::recommend(habit.name(), mean(&values), mean(last_n(&values, 7)))
            })
            .collect();

        // stable, so habits keep snapshot order within a priority
        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }

    /// First matching rule for a habit's window average and recent average
    pub fn recommend(habit_name: &str, average: f64, recent_average: f64) -> Option<Recommendation> {
        let (kind, priority, message) = if average < 40.0 {
            (
                RecommendationType::FocusHabit,
                Priority::High,
                format!(
                    "Consider focusing more attention on '{}' - current performance is {}%",
                    habit_name, average as i64
                ),
            )
        } else if average < 60.0 && recent_average < average - 10.0 {
            (
                RecommendationType::StreakRecovery,
                Priority::Medium,
                format!(
                    "'{}' performance has declined recently. Focus on rebuilding consistency.",
                    habit_name
                ),
            )
        } else if average > 85.0 {
            (
                RecommendationType::GoalAdjustment,
                Priority::Low,
                format!(
                    "'{}' is performing excellently ({}%). Consider increasing the challenge.",
                    habit_name, average as i64
                ),
            )
        } else {
            return None;
        };

        Some(Recommendation {
            kind,
            message,
            priority,
            habit_name: Some(habit_name.to_string()),
        })
    }
}
