/// Streak statistics across all habits

use serde::{Deserialize, Serialize};

use crate::domain::HabitSnapshot;

/// Fixed recovery rate reported until recovery detection exists
///
/// This is not computed from the data.
// TODO: replace with the share of broken streaks followed by a new streak
// within a grace period once that period is defined.
pub const PLACEHOLDER_RECOVERY_RATE: f64 = 75.0;

/// Aggregated streak statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakAnalysis {
    /// Longest streak that is still running, across habits
    pub longest_current_streak: u32,
    /// Longest streak ever recorded, across habits
    pub longest_overall_streak: u32,
    /// Mean length of every recorded streak
    pub average_streak_length: f64,
    /// Always [`PLACEHOLDER_RECOVERY_RATE`]
    pub streak_recovery_rate: f64,
    /// 0-100 step score of the average streak length
    pub streak_maintainability: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StreakAnalyzer;

impl StreakAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Each habit's streak list is read most recent first; its first streak
    /// is the current one.
    pub fn analyze(&self, habits: &[&HabitSnapshot]) -> StreakAnalysis {
        let mut longest_current_streak = 0;
        let mut longest_overall_streak = 0;
        let mut lengths: Vec<f64> = Vec::new();

        for habit in habits {
            let streaks = habit.streaks();
            if streaks.is_empty() {
                continue;
            }

            longest_current_streak = longest_current_streak.max(habit.current_streak());
            for streak in streaks {
                longest_overall_streak = longest_overall_streak.max(streak.length());
                lengths.push(streak.length() as f64);
            }
        }

        let average_streak_length = crate::analytics::stats::mean(&lengths);

        StreakAnalysis {
            longest_current_streak,
            longest_overall_streak,
            average_streak_length,
            streak_recovery_rate: PLACEHOLDER_RECOVERY_RATE,
            streak_maintainability: Self::maintainability(average_streak_length),
        }
    }

    pub fn maintainability(average_streak_length: f64) -> f64 {
        if average_streak_length > 30.0 {
            90.0
        } else if average_streak_length > 14.0 {
            75.0
        } else if average_streak_length > 7.0 {
            60.0
        } else {
            40.0
        }
    }
}
