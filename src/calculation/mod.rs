//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions behind every payroll figure:
//! worked hours and attendance months, leave day counting, approved
//! reimbursement totals, monthly aggregation, the net salary calculation with
//! its audit trail, and the pagination used by every paged read.

mod attendance_hours;
mod leave_days;
mod monthly_aggregate;
mod pagination;
mod payroll_line;
mod reimbursement_total;

pub use attendance_hours::{attendance_months, records_in_month, worked_hours};
pub use leave_days::{leave_days, leaves_starting_in, total_leave_days};
pub use monthly_aggregate::build_monthly_aggregate;
pub use pagination::{PAGE_SIZE, PageRequest, PageWindow, paginate};
pub use payroll_line::{calculate_payroll_line, compute_payroll_line, is_payable_in};
pub use reimbursement_total::{approved_reimbursement_total, reimbursements_in_month};
