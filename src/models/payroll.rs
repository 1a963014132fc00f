//! Payroll models.
//!
//! This module contains the derived, never-persisted types that flow through
//! the payroll engine: the [`MonthlyAggregate`] the ledgers produce, the
//! [`PayrollLine`] the engine computes from it, and the [`AuditStep`] trail
//! recording how each amount was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::YearMonth;

/// Ledger totals for one employee in one month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{MonthlyAggregate, YearMonth};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let aggregate = MonthlyAggregate {
///     employee_id: Uuid::new_v4(),
///     month: "2026-01".parse::<YearMonth>().unwrap(),
///     approved_reimbursement_total: Decimal::new(200, 0),
///     total_leave_days: 2,
///     pending_leave_days: 0,
/// };
/// assert_eq!(aggregate.month.to_string(), "2026-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregate {
    /// The employee the totals belong to.
    pub employee_id: Uuid,
    /// The month the totals cover.
    pub month: YearMonth,
    /// Sum of approved reimbursement amounts filed in the month.
    pub approved_reimbursement_total: Decimal,
    /// Leave days of approved requests starting in the month.
    pub total_leave_days: u32,
    /// Leave days of requests still awaiting a decision that start in the month.
    pub pending_leave_days: u32,
}

/// The net-salary breakdown of one employee for one month.
///
/// Every deduction and the bonus are whole currency units; the reimbursement
/// total keeps its stored precision; the net salary has at most two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollLine {
    /// The employee being paid.
    pub employee_id: Uuid,
    /// The month being paid.
    pub month: YearMonth,
    /// Base salary as parsed from the employee record.
    pub actual_salary: Decimal,
    /// Income tax withheld.
    pub tax: Decimal,
    /// Provident fund contribution.
    pub pf: Decimal,
    /// ESI contribution.
    pub esi: Decimal,
    /// Bonus paid.
    pub bonus: Decimal,
    /// Approved reimbursements paid back.
    pub reimbursement_total: Decimal,
    /// Amount paid out.
    pub net_salary: Decimal,
}

/// A single step in the audit trail of a payroll line.
///
/// Each step captures the input, output, and reasoning for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A payroll line together with the ordered steps that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollCalculation {
    /// The computed line.
    pub line: PayrollLine,
    /// One step per rule, in application order.
    pub audit_steps: Vec<AuditStep>,
}
