//! Leave request model and its status transitions.
//!
//! Status moves `Pending → Approved | Rejected` on an organization decision and
//! to `Cancelled` on an employee cancellation. Editing a request sends it back
//! to `Pending`; a cancelled request can no longer be edited or decided.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Awaiting an organization decision.
    Pending,
    /// Approved by the organization.
    Approved,
    /// Rejected by the organization.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

/// The employee-editable fields of a leave request.
///
/// Validated before it reaches a [`LeaveRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveInput {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Optional time the leave starts on the first day.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Optional time the leave ends on the last day.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Why the employee is taking leave.
    pub reason: String,
}

impl LeaveInput {
    /// Checks the reason is present and the date and time ranges are ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::LeaveInput;
    /// use chrono::NaiveDate;
    ///
    /// let input = LeaveInput {
    ///     start_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
    ///     start_time: None,
    ///     end_time: None,
    ///     reason: "Family event".to_string(),
    /// };
    /// assert!(input.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.reason.trim().is_empty() {
            return Err(EngineError::validation("reason", "missing required field"));
        }
        if self.end_date < self.start_date {
            return Err(EngineError::validation(
                "date range",
                format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                return Err(EngineError::validation(
                    "time range",
                    format!("end time {} is before start time {}", end, start),
                ));
            }
        }
        Ok(())
    }
}

/// A leave request filed by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: Uuid,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Optional start time on the first day.
    pub start_time: Option<NaiveTime>,
    /// Optional end time on the last day.
    pub end_time: Option<NaiveTime>,
    /// Why the employee is taking leave.
    pub reason: String,
    /// Current lifecycle state.
    pub status: LeaveStatus,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Creates a pending request from validated input.
    pub fn new(employee_id: Uuid, input: LeaveInput, created_at: DateTime<Utc>) -> EngineResult<Self> {
        input.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            start_date: input.start_date,
            end_date: input.end_date,
            start_time: input.start_time,
            end_time: input.end_time,
            reason: input.reason,
            status: LeaveStatus::Pending,
            created_at,
        })
    }

    /// Replaces the editable fields and resets the status to `Pending`.
    ///
    /// Approved and rejected requests may be edited and go back for a new
    /// decision; cancelled requests are final.
    pub fn revise(&mut self, input: LeaveInput) -> EngineResult<()> {
        input.validate()?;
        if self.status == LeaveStatus::Cancelled {
            return Err(EngineError::conflict("a cancelled leave request cannot be edited"));
        }

        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.start_time = input.start_time;
        self.end_time = input.end_time;
        self.reason = input.reason;
        self.status = LeaveStatus::Pending;
        Ok(())
    }

    /// Marks the request cancelled.
    pub fn cancel(&mut self) -> EngineResult<()> {
        if self.status == LeaveStatus::Cancelled {
            return Err(EngineError::conflict("leave is already cancelled"));
        }
        self.status = LeaveStatus::Cancelled;
        Ok(())
    }

    /// Applies an organization decision to a pending request.
    pub fn decide(&mut self, decision: LeaveStatus) -> EngineResult<()> {
        if !matches!(decision, LeaveStatus::Approved | LeaveStatus::Rejected) {
            return Err(EngineError::validation(
                "status",
                format!("{:?} is not a decision; use Approved or Rejected", decision),
            ));
        }
        if self.status != LeaveStatus::Pending {
            return Err(EngineError::conflict(format!(
                "leave request is {:?}, only pending requests can be decided",
                self.status
            )));
        }
        self.status = decision;
        Ok(())
    }
}
