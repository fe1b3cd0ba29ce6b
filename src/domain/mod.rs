/// Domain module containing the habit snapshot data model
///
/// This module defines the read-only entities (HabitSnapshot, ScoreSample,
/// Entry, Streak) that the analytics engine consumes, together with their
/// validation rules.

pub mod habit;
pub mod entry;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use entry::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur while building a snapshot
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Duplicate habit name in snapshot: {0}")]
    DuplicateHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Invalid streak: {0}")]
    InvalidStreak(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
