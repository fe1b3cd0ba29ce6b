/// Calendar fields and day arithmetic used by bucketing and per-day rows

use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

/// Calendar attributes of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFields {
    /// ISO numbering, 1 = Monday .. 7 = Sunday
    pub day_of_week: u32,
    pub day_of_month: u32,
    /// 1 = January .. 12 = December
    pub month: u32,
    pub year: i32,
    /// ISO 8601 week number
    pub week_of_year: u32,
    /// 1..4
    pub quarter: u32,
    pub is_weekend: bool,
}

impl CalendarFields {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            day_of_week: date.weekday().number_from_monday(),
            day_of_month: date.day(),
            month: date.month(),
            year: date.year(),
            week_of_year: date.iso_week().week(),
            quarter: quarter(date),
            is_weekend: is_weekend(date),
        }
    }
}

pub fn quarter(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `date` moved by `days`, or None past the ends of the calendar
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Signed number of days from `start` to `end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Meteorological season of the northern hemisphere
pub fn season(date: NaiveDate) -> &'static str {
    match date.month() {
        12 | 1 | 2 => "Winter",
        3..=5 => "Spring",
        6..=8 => "Summer",
        _ => "Fall",
    }
}
