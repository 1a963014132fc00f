//! Attendance records and check-in challenges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// A check-in/check-out pair for one employee.
///
/// A record is open until its checkout time is set; an employee has at most
/// one open record at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee who checked in.
    pub employee_id: Uuid,
    /// When the employee checked in.
    pub check_in_time: DateTime<Utc>,
    /// When the employee checked out, unset while the record is open.
    pub check_out_time: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// Creates an open record checked in at `at`.
    pub fn open(employee_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            check_in_time: at,
            check_out_time: None,
        }
    }

    /// Returns true while the record has no checkout time.
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }
}

/// A pending one-time code between a check-in request and its verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInChallenge {
    /// The employee the code was issued to.
    pub employee_id: Uuid,
    /// The six-digit code.
    pub code: String,
    /// The code is rejected at or after this instant.
    pub expires_at: DateTime<Utc>,
}

impl CheckInChallenge {
    /// Returns true if the challenge can no longer be redeemed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Hours worked on one attendance record.
///
/// Written as `"8.50 hours"`, or `"Not calculated"` while the record is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkedHours {
    /// Hours between check-in and checkout, rounded to two decimals.
    Calculated(Decimal),
    /// The employee has not checked out yet.
    NotCalculated,
}

const NOT_CALCULATED: &str = "Not calculated";

impl fmt::Display for WorkedHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkedHours::Calculated(hours) => write!(f, "{:.2} hours", hours),
            WorkedHours::NotCalculated => f.write_str(NOT_CALCULATED),
        }
    }
}

impl FromStr for WorkedHours {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NOT_CALCULATED {
            return Ok(WorkedHours::NotCalculated);
        }
        s.strip_suffix(" hours")
            .and_then(|hours| Decimal::from_str(hours).ok())
            .map(WorkedHours::Calculated)
            .ok_or_else(|| format!("Invalid worked hours: {}", s))
    }
}

impl Serialize for WorkedHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WorkedHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
