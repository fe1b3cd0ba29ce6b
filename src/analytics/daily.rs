/// Per-day advanced score rows for one habit
///
/// Each row scores one day using only the history known on that day, and
/// carries the calendar fields and logged entry an export table needs.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::analytics::calendar::CalendarFields;
use crate::analytics::normalizer::{AdvancedScore, ScoreNormalizer};
use crate::domain::HabitSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyScoreRow {
    pub habit_name: String,
    pub habit_id: String,
    pub score: AdvancedScore,
    pub calendar: CalendarFields,
    pub is_completed: bool,
    /// Logged value for the day, if there is an entry
    pub entry_value: Option<f64>,
    pub entry_notes: Option<String>,
}

/// One row per score sample of `habit` dated within [start, end]
pub fn daily_scores(habit: &HabitSnapshot, start: NaiveDate, end: NaiveDate) -> Vec<DailyScoreRow> {
    let normalizer = ScoreNormalizer::new();

    habit
        .scores_between(start, end)
        .iter()
        .map(|sample| {
            let date = sample.date();
            let history = habit.scores_through(date);
            let entry = habit.entry_on(date);

            DailyScoreRow {
                habit_name: habit.name().to_string(),
                habit_id: habit.id().to_string(),
                score: normalizer.normalize(sample.value(), habit, date, history),
                calendar: CalendarFields::for_date(date),
                is_completed: entry.map_or(false, |e| habit.is_completed(e)),
                entry_value: entry.map(|e| e.value),
                entry_notes: entry.and_then(|e| e.notes.clone()),
            }
        })
        .collect()
}
