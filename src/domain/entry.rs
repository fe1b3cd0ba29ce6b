/// Per-day records attached to a habit snapshot
///
/// This module defines ScoreSample (the upstream 0-1 habit score for a day)
/// and Entry (what the user actually logged for a day).

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::DomainError;

/// The upstream raw performance score of a habit on one day
///
/// Values are always finite and inside [0, 1]; construction and
/// deserialization both reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreSample", into = "RawScoreSample")]
pub struct ScoreSample {
    date: NaiveDate,
    value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawScoreSample {
    date: NaiveDate,
    value: f64,
}

impl ScoreSample {
    /// Create a score sample with validation
    pub fn new(date: NaiveDate, value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DomainError::InvalidScore(
                format!("Score for {} must be within [0, 1], got {}", date, value)
            ));
        }
        Ok(Self { date, value })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Raw score in [0, 1]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Score rescaled to the 0-100 range used by every report metric
    pub fn percent(&self) -> f64 {
        self.value * 100.0
    }
}

impl TryFrom<RawScoreSample> for ScoreSample {
    type Error = DomainError;

    fn try_from(raw: RawScoreSample) -> Result<Self, Self::Error> {
        ScoreSample::new(raw.date, raw.value)
    }
}

impl From<ScoreSample> for RawScoreSample {
    fn from(sample: ScoreSample) -> Self {
        RawScoreSample { date: sample.date, value: sample.value }
    }
}

/// A record of what was logged for a habit on a specific day
///
/// Boolean habits log 0 for "not done" and a positive value for "done";
/// numerical habits log the amount achieved. Upstream provides one entry
/// per day, misses included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Which day this entry is for
    pub date: NaiveDate,
    /// Logged value (completion flag or amount)
    pub value: f64,
    /// User's notes about this day
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entry {
    /// Create a new entry with validation
    pub fn new(date: NaiveDate, value: f64, notes: Option<String>) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidValue {
                message: format!("Entry value for {} must be a finite number", date),
            });
        }
        Ok(Self { date, value, notes })
    }

    /// Shorthand for a boolean habit's entry: 1.0 when done, 0.0 otherwise
    pub fn check(date: NaiveDate, done: bool) -> Self {
        Self {
            date,
            value: if done { 1.0 } else { 0.0 },
            notes: None,
        }
    }

    /// Check if this entry has non-blank notes
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().map_or(false, |n| !n.trim().is_empty())
    }
}
