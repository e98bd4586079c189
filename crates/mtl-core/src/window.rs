//! Time windows used to filter log records.
//!
//! All boundaries are local wall-clock times. Ranges are half-open:
//! `start` is included and `end` is excluded.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Seconds per displayed minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Default number of workdays used for the weekly average.
pub const DEFAULT_WORKDAYS_PER_WEEK: u32 = 5;

/// Error for workday counts outside a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("workdays per week must be between 1 and 7, got {0}")]
pub struct InvalidWorkdays(pub u32);

/// Validates a configured workdays-per-week value.
pub const fn validate_workdays(workdays_per_week: u32) -> Result<u32, InvalidWorkdays> {
    if workdays_per_week >= 1 && workdays_per_week <= 7 {
        Ok(workdays_per_week)
    } else {
        Err(InvalidWorkdays(workdays_per_week))
    }
}

/// A half-open range of local timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// A range containing every representable timestamp.
    ///
    /// Wider than what the log can store: encoded records only carry years
    /// 0 through 9999.
    pub const fn unbounded() -> Self {
        Self {
            start: NaiveDateTime::MIN,
            end: NaiveDateTime::MAX,
        }
    }

    /// Returns true if `timestamp` falls inside the range.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}

/// The reporting windows offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// From local midnight of the current day.
    Today,
    /// From Monday 00:00 of the current ISO week.
    Week,
}

impl Window {
    /// Resolves the window to a concrete range around `now`.
    pub fn range(self, now: NaiveDateTime) -> TimeRange {
        match self {
            Self::Today => {
                let start = midnight(now.date());
                TimeRange::new(start, start + Duration::days(1))
            }
            Self::Week => {
                let start = week_start(now);
                TimeRange::new(start, start + Duration::days(7))
            }
        }
    }

    /// The inclusive lower bound of the window around `now`.
    pub fn start(self, now: NaiveDateTime) -> NaiveDateTime {
        self.range(now).start
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Day of the ISO week, Monday = 1 through Sunday = 7.
pub fn iso_weekday(now: NaiveDateTime) -> u32 {
    now.weekday().number_from_monday()
}

/// Monday 00:00:00 at or before `now`.
pub fn week_start(now: NaiveDateTime) -> NaiveDateTime {
    let offset = i64::from(iso_weekday(now) - 1);
    midnight(now.date() - Duration::days(offset))
}

/// Converts seconds to whole minutes, dropping any partial minute.
pub const fn seconds_to_minutes(seconds: i64) -> i64 {
    seconds.div_euclid(SECONDS_PER_MINUTE)
}

/// Workdays elapsed so far this week, capped at `workdays_per_week`.
///
/// Never returns zero.
pub fn elapsed_workdays(now: NaiveDateTime, workdays_per_week: u32) -> u32 {
    iso_weekday(now).min(workdays_per_week).max(1)
}

/// Average minutes per elapsed workday this week (integer division).
pub fn per_day(week_total_minutes: i64, now: NaiveDateTime, workdays_per_week: u32) -> i64 {
    week_total_minutes / i64::from(elapsed_workdays(now, workdays_per_week))
}
