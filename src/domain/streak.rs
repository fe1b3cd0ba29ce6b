/// Streak records and their derivation from entries
///
/// This module defines the Streak struct (one run of consecutive completed
/// days) and provides the method for rebuilding a habit's streak list from its
/// entries when the upstream store does not supply one.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{DomainError, Entry};

/// One run of consecutive completed days
///
/// Both ends are inclusive, so a streak that starts and ends on the same
/// day has length 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStreak", into = "RawStreak")]
pub struct Streak {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawStreak {
    start: NaiveDate,
    end: NaiveDate,
}

impl Streak {
    /// Create a streak, rejecting an end date before the start date
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidStreak(
                format!("Streak end {} is before its start {}", end, start)
            ));
        }
        Ok(Self { start, end })
    }

    /// A streak of `length` days finishing on `end`, for test fixtures
    ///
    /// A zero length is treated as a one-day streak.
    #[cfg(test)]
    pub(crate) fn ending_on(end: NaiveDate, length: u32) -> Self {
        let span = length.max(1) as i64 - 1;
        Self {
            start: end - chrono::Duration::days(span),
            end,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the streak, both ends included
    pub fn length(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Rebuild a streak list from entries, most recent streak first
    ///
    /// `is_completed` decides whether an entry counts toward a streak; a
    /// streak is a maximal run of completed entries on consecutive days.
    /// Entries may arrive in any order.
    pub fn derive_from_entries<F>(entries: &[Entry], is_completed: F) -> Vec<Streak>
    where
        F: Fn(&Entry) -> bool,
    {
        let mut completed_days: Vec<NaiveDate> = entries
            .iter()
            .filter(|e| is_completed(*e))
            .map(|e| e.date)
            .collect();

        if completed_days.is_empty() {
            return Vec::new();
        }

        // Oldest first for the run detection
        completed_days.sort();
        completed_days.dedup();

        let mut streaks = Vec::new();
        let mut run_start = completed_days[0];
        let mut last_date = completed_days[0];

        for &date in completed_days.iter().skip(1) {
            let days_diff = (date - last_date).num_days();

            if days_diff != 1 {
                // Run broken, close it
                streaks.push(Streak { start: run_start, end: last_date });
                run_start = date;
            }

            last_date = date;
        }

        // Don't forget the last run
        streaks.push(Streak { start: run_start, end: last_date });

        streaks.reverse();
        streaks
    }
}

impl TryFrom<RawStreak> for Streak {
    type Error = DomainError;

    fn try_from(raw: RawStreak) -> Result<Self, Self::Error> {
        Streak::new(raw.start, raw.end)
    }
}

impl From<Streak> for RawStreak {
    fn from(streak: Streak) -> Self {
        RawStreak { start: streak.start, end: streak.end }
    }
}
