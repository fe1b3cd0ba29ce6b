/// Core value types shared by the snapshot model
///
/// This module defines the identifier and frequency types that HabitSnapshot,
/// Entry and the analytics layer all build on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass an arbitrary string where a habit ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful when a client names a habit by ID)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit should be performed, as "numerator times every
/// denominator days"
///
/// A daily habit is 1/1, three times a week is 3/7. The denominator is
/// guaranteed to be non-zero: construction and deserialization both go
/// through [`Frequency::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFrequency", into = "RawFrequency")]
pub struct Frequency {
    numerator: u32,
    denominator: u32,
}

/// Unvalidated wire form of a frequency
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawFrequency {
    numerator: u32,
    denominator: u32,
}

impl Frequency {
    /// Once per day
    pub const DAILY: Frequency = Frequency { numerator: 1, denominator: 1 };

    /// Once per week
    pub const WEEKLY: Frequency = Frequency { numerator: 1, denominator: 7 };

    /// Create a frequency, rejecting a zero denominator
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, DomainError> {
        if denominator == 0 {
            return Err(DomainError::InvalidFrequency(
                format!("Frequency denominator must be greater than 0, got {}/{}", numerator, denominator)
            ));
        }
        Ok(Self { numerator, denominator })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Expected occurrences per day (1.0 for daily, 3/7 for three times a week)
    pub fn per_day(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl TryFrom<RawFrequency> for Frequency {
    type Error = DomainError;

    fn try_from(raw: RawFrequency) -> Result<Self, Self::Error> {
        Frequency::new(raw.numerator, raw.denominator)
    }
}

impl From<Frequency> for RawFrequency {
    fn from(frequency: Frequency) -> Self {
        RawFrequency {
            numerator: frequency.numerator,
            denominator: frequency.denominator,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
