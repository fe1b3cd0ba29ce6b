/// Habit snapshot entity and the snapshot set handed to the analytics engine
///
/// A HabitSnapshot is a read-only view of one habit: its settings plus the
/// score, entry and streak history captured at one moment. The engine never
/// mutates it; a new snapshot replaces the old one when the data changes.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{DomainError, Entry, Frequency, HabitId, ScoreSample, Streak};

/// Immutable view of one habit and its history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHabitSnapshot")]
pub struct HabitSnapshot {
    id: HabitId,
    name: String,
    frequency: Frequency,
    is_archived: bool,
    is_numerical: bool,
    target_value: f64,
    unit: Option<String>,
    /// Chronological, oldest first
    scores: Vec<ScoreSample>,
    /// Chronological, oldest first
    entries: Vec<Entry>,
    /// Most recent streak first
    streaks: Vec<Streak>,
}

/// Wire form of a snapshot before validation and ordering
#[derive(Debug, Deserialize)]
struct RawHabitSnapshot {
    #[serde(default)]
    id: HabitId,
    name: String,
    frequency: Frequency,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    is_numerical: bool,
    #[serde(default)]
    target_value: f64,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    scores: Vec<ScoreSample>,
    #[serde(default)]
    entries: Vec<Entry>,
    /// When absent the streak list is derived from the entries
    #[serde(default)]
    streaks: Option<Vec<Streak>>,
}

impl TryFrom<RawHabitSnapshot> for HabitSnapshot {
    type Error = DomainError;

    fn try_from(raw: RawHabitSnapshot) -> Result<Self, Self::Error> {
        let mut habit = HabitSnapshot::new(raw.name, raw.frequency)?
            .with_scores(raw.scores)
            .with_entries(raw.entries);
        habit.id = raw.id;
        habit.is_archived = raw.is_archived;
        habit.unit = raw.unit;
        if raw.is_numerical {
            habit = habit.numerical(raw.target_value)?;
        }
        Ok(match raw.streaks {
            Some(streaks) => habit.with_streaks(streaks),
            None => habit.with_derived_streaks(),
        })
    }
}

impl HabitSnapshot {
    /// Create an empty boolean habit snapshot with validation
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            frequency,
            is_archived: false,
            is_numerical: false,
            target_value: 0.0,
            unit: None,
            scores: Vec::new(),
            entries: Vec::new(),
            streaks: Vec::new(),
        })
    }

    /// Attach the score history, sorted oldest first
    pub fn with_scores(mut self, mut scores: Vec<ScoreSample>) -> Self {
        scores.sort_by_key(|s| s.date());
        self.scores = scores;
        self
    }

    /// Attach the entry history, sorted oldest first
    pub fn with_entries(mut self, mut entries: Vec<Entry>) -> Self {
        entries.sort_by_key(|e| e.date);
        self.entries = entries;
        self
    }

    /// Attach the streak list, expected most recent first
    pub fn with_streaks(mut self, streaks: Vec<Streak>) -> Self {
        self.streaks = streaks;
        self
    }

    /// Replace the streak list with one derived from the current entries
    pub fn with_derived_streaks(mut self) -> Self {
        let streaks = {
            let this = &self;
            Streak::derive_from_entries(&this.entries, |e| this.is_completed(e))
        };
        self.streaks = streaks;
        self
    }

    /// Mark this habit as numerical with the given daily target
    pub fn numerical(mut self, target_value: f64) -> Result<Self, DomainError> {
        if !target_value.is_finite() || target_value < 0.0 {
            return Err(DomainError::InvalidValue {
                message: format!("Target value must be a non-negative number, got {}", target_value),
            });
        }
        self.is_numerical = true;
        self.target_value = target_value;
        Ok(self)
    }

    /// Mark this habit as archived (excluded from reports)
    pub fn archived(mut self) -> Self {
        self.is_archived = true;
        self
    }

    /// Keep a specific identifier (e.g. the one the upstream store uses)
    pub fn with_id(mut self, id: HabitId) -> Self {
        self.id = id;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    pub fn is_numerical(&self) -> bool {
        self.is_numerical
    }

    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn scores(&self) -> &[ScoreSample] {
        &self.scores
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    /// Scores dated within [start, end], oldest first
    pub fn scores_between(&self, start: NaiveDate, end: NaiveDate) -> &[ScoreSample] {
        let from = self.scores.partition_point(|s| s.date() < start);
        let to = self.scores.partition_point(|s| s.date() <= end);
        if from >= to {
            return &[];
        }
        &self.scores[from..to]
    }

    /// Scores dated on or before `date`, oldest first
    pub fn scores_through(&self, date: NaiveDate) -> &[ScoreSample] {
        let to = self.scores.partition_point(|s| s.date() <= date);
        &self.scores[..to]
    }

    /// Entries dated within [start, end], oldest first
    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> &[Entry] {
        let from = self.entries.partition_point(|e| e.date < start);
        let to = self.entries.partition_point(|e| e.date <= end);
        if from >= to {
            return &[];
        }
        &self.entries[from..to]
    }

    /// First entry logged for `date`, if any
    pub fn entry_on(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries_between(date, date).first()
    }

    /// Length of the most recent streak, 0 when there are no streaks
    pub fn current_streak(&self) -> u32 {
        self.streaks.first().map(|s| s.length()).unwrap_or(0)
    }

    /// Whether an entry counts as a completion for this habit
    ///
    /// Boolean habits need a positive value; numerical habits need to reach
    /// the target.
    pub fn is_completed(&self, entry: &Entry) -> bool {
        if self.is_numerical {
            entry.value > 0.0 && entry.value >= self.target_value
        } else {
            entry.value > 0.0
        }
    }

    /// Value of an entry as used by correlation analysis: the raw amount for
    /// numerical habits, 1.0 / 0.0 for boolean ones
    pub fn entry_signal(&self, entry: &Entry) -> f64 {
        if self.is_numerical {
            entry.value
        } else if entry.value > 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }
}

/// Immutable set of habit snapshots taken at one moment
///
/// Habit names are unique within a set, since reports key per-habit
/// results by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshotSet")]
pub struct SnapshotSet {
    habits: Vec<HabitSnapshot>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshotSet {
    #[serde(default)]
    habits: Vec<HabitSnapshot>,
}

impl TryFrom<RawSnapshotSet> for SnapshotSet {
    type Error = DomainError;

    fn try_from(raw: RawSnapshotSet) -> Result<Self, Self::Error> {
        SnapshotSet::new(raw.habits)
    }
}

impl SnapshotSet {
    /// Create a snapshot set, rejecting duplicate habit names
    pub fn new(habits: Vec<HabitSnapshot>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = habits.iter().find(|h| !seen.insert(h.name())) {
            return Err(DomainError::DuplicateHabitName(duplicate.name().to_string()));
        }
        Ok(Self { habits })
    }

    /// Every habit, archived ones included
    pub fn all(&self) -> &[HabitSnapshot] {
        &self.habits
    }

    /// Habits that take part in reports (not archived), in snapshot order
    pub fn active(&self) -> Vec<&HabitSnapshot> {
        self.habits.iter().filter(|h| !h.is_archived()).collect()
    }

    /// Find a habit by exact name or by ID string
    pub fn find(&self, name_or_id: &str) -> Option<&HabitSnapshot> {
        self.habits
            .iter()
            .find(|h| h.name() == name_or_id)
            .or_else(|| {
                let id = HabitId::from_string(name_or_id).ok()?;
                self.habits.iter().find(|h| *h.id() == id)
            })
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}
