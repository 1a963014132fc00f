//! Report and page models returned to the presentation layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Employee, LeaveRequest, PayrollLine, Reimbursement, WorkedHours, YearMonth};

/// Position of a page within a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The 1-based page that was returned.
    pub current_page: u32,
    /// Number of items across all pages.
    pub total_items: usize,
    /// `ceil(total_items / page_size)`.
    pub total_pages: usize,
}

/// One employee's row in a monthly payroll entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReportLine {
    /// Organization-scoped employee code.
    pub employee_code: String,
    /// "first last".
    pub employee_name: String,
    /// The engine output.
    #[serde(flatten)]
    pub line: PayrollLine,
    /// Leave days of approved requests starting in the month.
    pub total_leave_days: u32,
    /// Leave days of pending requests starting in the month.
    pub pending_leave_days: u32,
    /// Every claim filed in the month, whatever its status.
    pub reimbursements: Vec<Reimbursement>,
}

/// The payroll lines of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPayroll {
    /// The month being paid.
    pub month: YearMonth,
    /// One line per eligible employee, in organization order.
    pub lines: Vec<PayrollReportLine>,
}

/// A page of the monthly payroll report. Months are the paginated unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReport {
    /// Page position.
    #[serde(flatten)]
    pub page: PageInfo,
    /// Months on this page, ascending.
    pub salary_details: Vec<MonthlyPayroll>,
}

/// One row of an employee's attendance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    /// The attendance record.
    pub id: Uuid,
    /// UTC date of the check-in.
    pub date: NaiveDate,
    /// When the employee checked in.
    pub check_in_time: DateTime<Utc>,
    /// When the employee checked out, if they have.
    pub check_out_time: Option<DateTime<Utc>>,
    /// `"8.50 hours"`, or `"Not calculated"` while the record is open.
    pub total_worked_hours: WorkedHours,
}

/// A page of attendance history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePage {
    /// Page position.
    #[serde(flatten)]
    pub page: PageInfo,
    /// Records on this page.
    pub attendance_details: Vec<AttendanceEntry>,
}

/// A page of leave requests that have not ended yet, earliest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingLeavePage {
    /// Page position.
    #[serde(flatten)]
    pub page: PageInfo,
    /// Requests on this page.
    pub upcoming_leaves: Vec<LeaveRequest>,
}

/// A page of an organization's employees, in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    #[serde(flatten)]
    pub page: PageInfo,
    pub employees: Vec<Employee>,
}

/// Every leave request one employee has filed, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLeaves {
    pub employee_id: Uuid,
    pub employee_code: String,
    pub employee_name: String,
    pub leaves: Vec<LeaveRequest>,
}

/// A page of leave ledgers. Employees are the paginated unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLeavePage {
    #[serde(flatten)]
    pub page: PageInfo,
    pub employee_leave_details: Vec<EmployeeLeaves>,
}

/// A claim together with who filed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationReimbursement {
    pub employee_code: String,
    pub employee_name: String,
    #[serde(flatten)]
    pub reimbursement: Reimbursement,
}

/// A page of an organization's claims. Claims are the paginated unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReimbursementPage {
    #[serde(flatten)]
    pub page: PageInfo,
    pub reimbursements: Vec<OrganizationReimbursement>,
}
