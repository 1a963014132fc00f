//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod leave;
mod payroll;
mod reimbursement;
mod report;
mod year_month;

pub use attendance::{AttendanceRecord, CheckInChallenge, WorkedHours};
pub use employee::{Compensation, Employee, Organization};
pub(crate) use employee::validate_rates;
pub use leave::{LeaveInput, LeaveRequest, LeaveStatus};
pub use payroll::{AuditStep, MonthlyAggregate, PayrollCalculation, PayrollLine};
pub use reimbursement::{Reimbursement, ReimbursementInput, ReimbursementStatus};
pub use report::{
    AttendanceEntry, AttendancePage, EmployeeLeavePage, EmployeeLeaves, EmployeePage,
    MonthlyPayroll, OrganizationReimbursement, PageInfo, PayrollReport, PayrollReportLine,
    ReimbursementPage, UpcomingLeavePage,
};
pub use year_month::YearMonth;
