//! Monthly aggregation of the leave and reimbursement ledgers.

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{LeaveRequest, LeaveStatus, MonthlyAggregate, Reimbursement, YearMonth};

use super::{approved_reimbursement_total, leaves_starting_in, reimbursements_in_month, total_leave_days};

/// Builds the ledger totals of one employee for one month.
///
/// `leaves` and `reimbursements` may span any period; only the leave requests
/// starting in `month` and the claims filed in `month` are counted.
pub fn build_monthly_aggregate(
    employee_id: Uuid,
    month: YearMonth,
    leaves: &[LeaveRequest],
    reimbursements: &[Reimbursement],
) -> EngineResult<MonthlyAggregate> {
    let approved_leaves = leaves_starting_in(leaves, month, LeaveStatus::Approved);
    let pending_leaves = leaves_starting_in(leaves, month, LeaveStatus::Pending);
    let claims = reimbursements_in_month(reimbursements, month);

    Ok(MonthlyAggregate {
        employee_id,
        month,
        approved_reimbursement_total: approved_reimbursement_total(claims)?,
        total_leave_days: total_leave_days(approved_leaves),
        pending_leave_days: total_leave_days(pending_leaves),
    })
}
