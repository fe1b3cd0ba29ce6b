/// Conversion of raw 0-1 habit scores into the 100-point advanced score
///
/// The advanced score blends the day's raw score with signals taken from the
/// habit's recent history: how steady it has been, how fast it is moving,
/// which way it is heading and how long the current streak is.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::analytics::stats::{before_last, last_n, mean, percents, steadiness};
use crate::domain::{HabitSnapshot, ScoreSample};

/// Direction a score series is moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    /// Classify `recent` against `previous` with a 5-point dead band
    pub fn compare(recent: f64, previous: f64) -> Self {
        if recent > previous + 5.0 {
            TrendDirection::Up
        } else if recent < previous - 5.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "UP",
            TrendDirection::Down => "DOWN",
            TrendDirection::Stable => "STABLE",
        }
    }
}

/// 100-point score of one habit on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvancedScore {
    pub date: NaiveDate,
    /// 0-100, weighted blend of raw score, consistency and streak bonus
    pub daily_score: f64,
    /// 0-100, last-7-sample average adjusted for frequency
    pub weekly_score: f64,
    /// 0-100, last-30-sample average plus maturity bonus
    pub monthly_score: f64,
    pub trend_direction: TrendDirection,
    /// 0-100, higher means steadier recent scores
    pub consistency_score: f64,
    /// -50..50, change between the last two 7-sample windows
    pub velocity_score: f64,
    /// 0-20, step bonus for the current streak length
    pub streak_bonus: f64,
    /// The 0-1 input score, echoed
    pub raw_score: f64,
}

/// Neutral consistency used until a week of history exists
pub const CONSISTENCY_PRIOR: f64 = 50.0;

/// Converts raw scores into advanced scores
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreNormalizer;

impl ScoreNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Build the advanced score for `raw_score` on `date`
    ///
    /// `history` is the habit's score series, oldest first, as available up
    /// to and including `date`.
    pub fn normalize(
        &self,
        raw_score: f64,
        habit: &HabitSnapshot,
        date: NaiveDate,
        history: &[ScoreSample],
    ) -> AdvancedScore {
        let base_score = (raw_score * 100.0).clamp(0.0, 100.0);
        let values = percents(history);

        let consistency_score = Self::consistency(&values);
        let velocity_score = Self::velocity(&values);
        let trend_direction = Self::trend(&values);
        let streak_bonus = Self::streak_bonus(habit.current_streak());

        let daily_score = Self::daily(base_score, consistency_score, streak_bonus);
        let weekly_score = Self::weekly(daily_score, &values, habit.frequency().per_day());
        let monthly_score = Self::monthly(weekly_score, &values);

        AdvancedScore {
            date,
            daily_score,
            weekly_score,
            monthly_score,
            trend_direction,
            consistency_score,
            velocity_score,
            streak_bonus,
            raw_score,
        }
    }

    /// 70% base score, 20% consistency, 10% streak bonus
    fn daily(base_score: f64, consistency_score: f64, streak_bonus: f64) -> f64 {
        let weighted = base_score * 0.7 + consistency_score * 0.2 + streak_bonus * 0.1;
        weighted.clamp(0.0, 100.0)
    }

    fn weekly(daily_score: f64, values: &[f64], per_day: f64) -> f64 {
        if values.len() < 7 {
            return daily_score;
        }

        let average = mean(last_n(values, 7));
        (average * Self::frequency_multiplier(per_day)).clamp(0.0, 100.0)
    }

    /// Less frequent habits get a small boost on the weekly score
    pub fn frequency_multiplier(per_day: f64) -> f64 {
        if per_day >= 1.0 {
            1.0
        } else if per_day >= 0.5 {
            1.1
        } else {
            1.2
        }
    }

    fn monthly(weekly_score: f64, values: &[f64]) -> f64 {
        if values.len() < 30 {
            return weekly_score;
        }

        let average = mean(last_n(values, 30));
        let maturity_bonus = (values.len() as f64 / 30.0).min(5.0);
        (average + maturity_bonus).clamp(0.0, 100.0)
    }

    fn consistency(values: &[f64]) -> f64 {
        if values.len() < 7 {
            return CONSISTENCY_PRIOR;
        }
        steadiness(last_n(values, 7))
    }

    fn velocity(values: &[f64]) -> f64 {
        if values.len() < 14 {
            return 0.0;
        }

        let recent = mean(last_n(values, 7));
        let previous = mean(before_last(values, 7, 7));
        (recent - previous).clamp(-50.0, 50.0)
    }

    fn trend(values: &[f64]) -> TrendDirection {
        if values.len() < 7 {
            return TrendDirection::Stable;
        }

        let recent = mean(last_n(values, 3));
        let previous = mean(before_last(values, 3, 3));
        TrendDirection::compare(recent, previous)
    }

    /// Step bonus for the current streak length
    pub fn streak_bonus(current_streak: u32) -> f64 {
        let bonus: f64 = match current_streak {
            100..=u32::MAX => 20.0,
            50..=99 => 15.0,
            30..=49 => 10.0,
            14..=29 => 5.0,
            7..=13 => 2.0,
            _ => 0.0,
        };
        bonus.clamp(0.0, 20.0)
    }
}
