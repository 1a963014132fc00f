//! Attendance aggregation.
//!
//! This module derives worked hours from attendance records and groups the
//! records by the calendar month of their check-in.

use std::collections::BTreeSet;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AttendanceRecord, WorkedHours, YearMonth};

const MILLISECONDS_PER_HOUR: i64 = 3_600_000;

/// Returns the hours worked on a record, rounded to two decimals.
///
/// An open record has no checkout time and yields
/// [`WorkedHours::NotCalculated`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::worked_hours;
/// use payroll_engine::models::{AttendanceRecord, WorkedHours};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let check_in = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let mut record = AttendanceRecord::open(Uuid::new_v4(), check_in);
/// assert_eq!(worked_hours(&record), WorkedHours::NotCalculated);
///
/// record.check_out_time = Some(Utc.with_ymd_and_hms(2026, 1, 15, 17, 30, 0).unwrap());
/// assert_eq!(worked_hours(&record), WorkedHours::Calculated(Decimal::new(850, 2)));
/// ```
pub fn worked_hours(record: &AttendanceRecord) -> WorkedHours {
    match record.check_out_time {
        Some(check_out) => {
            let milliseconds = (check_out - record.check_in_time).num_milliseconds();
            let hours = Decimal::from(milliseconds) / Decimal::from(MILLISECONDS_PER_HOUR);
            WorkedHours::Calculated(
                hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
        }
        None => WorkedHours::NotCalculated,
    }
}

/// Returns the distinct months with at least one check-in, ascending.
pub fn attendance_months<'a, I>(records: I) -> Vec<YearMonth>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .map(|record| YearMonth::of(&record.check_in_time))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Returns the records whose check-in falls in the month's half-open window.
pub fn records_in_month<'a, I>(records: I, month: YearMonth) -> Vec<&'a AttendanceRecord>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .filter(|record| month.contains(record.check_in_time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn closed(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> AttendanceRecord {
        let mut record = AttendanceRecord::open(Uuid::new_v4(), check_in);
        record.check_out_time = Some(check_out);
        record
    }

    #[test]
    fn test_eight_hour_day() {
        let record = closed(at(2026, 1, 5, 9, 0, 0), at(2026, 1, 5, 17, 0, 0));
        assert_eq!(worked_hours(&record), WorkedHours::Calculated(dec("8")));
    }

    #[test]
    fn test_hours_rounded_to_two_decimals() {
        // 7h 20m = 7.3333... hours
        let record = closed(at(2026, 1, 5, 9, 0, 0), at(2026, 1, 5, 16, 20, 0));
        assert_eq!(worked_hours(&record), WorkedHours::Calculated(dec("7.33")));
    }

    #[test]
    fn test_hours_midpoint_rounds_away_from_zero() {
        // 18 seconds = 0.005 hours
        let record = closed(at(2026, 1, 5, 9, 0, 0), at(2026, 1, 5, 9, 0, 18));
        assert_eq!(worked_hours(&record), WorkedHours::Calculated(dec("0.01")));
    }

    #[test]
    fn test_overnight_record() {
        let record = closed(at(2026, 1, 5, 22, 0, 0), at(2026, 1, 6, 6, 45, 0));
        assert_eq!(worked_hours(&record), WorkedHours::Calculated(dec("8.75")));
    }

    #[test]
    fn test_open_record_not_calculated() {
        let record = AttendanceRecord::open(Uuid::new_v4(), at(2026, 1, 5, 9, 0, 0));
        assert_eq!(worked_hours(&record), WorkedHours::NotCalculated);
    }

    #[test]
    fn test_attendance_months_distinct_and_ascending() {
        let records = vec![
            AttendanceRecord::open(Uuid::nil(), at(2026, 2, 3, 9, 0, 0)),
            AttendanceRecord::open(Uuid::nil(), at(2025, 12, 31, 23, 59, 59)),
            AttendanceRecord::open(Uuid::nil(), at(2026, 2, 20, 9, 0, 0)),
            AttendanceRecord::open(Uuid::nil(), at(2026, 1, 1, 0, 0, 0)),
        ];

        let months: Vec<String> = attendance_months(&records)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(months, vec!["2025-12", "2026-01", "2026-02"]);
    }

    #[test]
    fn test_attendance_months_empty() {
        let records: Vec<AttendanceRecord> = Vec::new();
        assert!(attendance_months(&records).is_empty());
    }

    #[test]
    fn test_records_in_month_uses_half_open_window() {
        let records = vec![
            AttendanceRecord::open(Uuid::nil(), at(2026, 1, 31, 23, 59, 59)),
            AttendanceRecord::open(Uuid::nil(), at(2026, 2, 1, 0, 0, 0)),
            AttendanceRecord::open(Uuid::nil(), at(2026, 2, 28, 18, 0, 0)),
            AttendanceRecord::open(Uuid::nil(), at(2026, 3, 1, 0, 0, 0)),
        ];
        let february = YearMonth::new(2026, 2).unwrap();

        let in_month = records_in_month(&records, february);
        assert_eq!(in_month.len(), 2);
        assert_eq!(in_month[0].check_in_time, at(2026, 2, 1, 0, 0, 0));
        assert_eq!(in_month[1].check_in_time, at(2026, 2, 28, 18, 0, 0));
    }
}
