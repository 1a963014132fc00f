//! Leave aggregation.
//!
//! A leave request counts `ceil((end_date - start_date) / 1 day)` days, and at
//! least one day even when it starts and ends on the same date. Requests are
//! assigned to the month their start date falls in.

use crate::models::{LeaveRequest, LeaveStatus, YearMonth};

/// Returns the number of days a single request counts for.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::leave_days;
/// use payroll_engine::models::{LeaveInput, LeaveRequest};
/// use chrono::{NaiveDate, Utc};
/// use uuid::Uuid;
///
/// let input = LeaveInput {
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     start_time: None,
///     end_time: None,
///     reason: "Dentist".to_string(),
/// };
/// let request = LeaveRequest::new(Uuid::new_v4(), input, Utc::now()).unwrap();
/// assert_eq!(leave_days(&request), 1);
/// ```
pub fn leave_days(request: &LeaveRequest) -> u32 {
    let days = (request.end_date - request.start_date).num_days();
    u32::try_from(days).unwrap_or(0).max(1)
}

/// Sums [`leave_days`] over the given requests.
///
/// Callers filter the requests to the period of interest first.
pub fn total_leave_days<'a, I>(requests: I) -> u32
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    requests.into_iter().map(leave_days).sum()
}

/// Returns the requests in `status` whose start date falls in `month`.
pub fn leaves_starting_in<'a, I>(
    requests: I,
    month: YearMonth,
    status: LeaveStatus,
) -> Vec<&'a LeaveRequest>
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    requests
        .into_iter()
        .filter(|request| request.status == status && month.contains_date(request.start_date))
        .collect()
}
