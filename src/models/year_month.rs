//! Calendar month model.
//!
//! This module defines [`YearMonth`], the `YYYY-MM` key every monthly
//! aggregate and payroll line is grouped by.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A calendar month, ordered chronologically and written as `YYYY-MM`.
///
/// Month windows are half-open UTC intervals: a month starts at 00:00 on day 1
/// and ends where the following month starts.
///
/// # Example
///
/// ```
/// use payroll_engine::models::YearMonth;
///
/// let month: YearMonth = "2026-01".parse().unwrap();
/// assert_eq!(month.to_string(), "2026-01");
/// assert_eq!(month.next().to_string(), "2026-02");
/// assert!(month < month.next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Creates a month from its year and 1-based month number.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| {
                EngineError::validation("month", format!("{year}-{month} is not a calendar month"))
            })
    }

    /// Returns the month a date or timestamp falls in.
    pub fn of<D: Datelike>(date: &D) -> Self {
        // Day 1 exists in every month chrono can represent.
        Self(NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(NaiveDate::MIN))
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The 1-based month number.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day 1 of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar month.
    pub fn next(&self) -> Self {
        Self(self.0 + Months::new(1))
    }

    /// Inclusive start of the month window (00:00 UTC on day 1).
    pub fn start(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// Exclusive end of the month window (start of the next month).
    pub fn end(&self) -> DateTime<Utc> {
        self.next().start()
    }

    /// Returns true if the timestamp lies in `[start, end)`.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start() && timestamp < self.end()
    }

    /// Returns true if the date falls in this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        Self::of(&date) == *self
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::validation("month", format!("'{s}' is not in YYYY-MM format"));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
