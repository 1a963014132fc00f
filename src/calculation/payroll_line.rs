//! Net salary calculation.
//!
//! This module turns an employee's compensation and one month's ledger totals
//! into a [`PayrollLine`]. Every rule is recorded as an [`AuditStep`] so a line
//! can be explained after the fact.
//!
//! Deductions are taken from the salary after tax, and each intermediate
//! amount is rounded before the next rule uses it.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, Employee, MonthlyAggregate, PayrollCalculation, PayrollLine, YearMonth,
};

fn round0(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn percent_of(field: &str, amount: Decimal, percent: Decimal) -> EngineResult<Decimal> {
    amount
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(round0)
        .ok_or_else(|| overflow(field, format!("{}% of {}", percent, amount)))
}

fn overflow(field: &str, expression: String) -> EngineError {
    EngineError::validation(field, format!("{} is out of range", expression))
}

/// Returns true when the employee had joined by the given month.
///
/// An employee joining mid-month is payable for that whole month.
pub fn is_payable_in(employee: &Employee, month: YearMonth) -> bool {
    month >= YearMonth::of(&employee.joined_on)
}

/// Calculates the payroll line for one employee and month, with its audit trail.
///
/// # Arguments
///
/// * `employee` - The employee being paid; the compensation is read from here
/// * `aggregate` - The employee's ledger totals for the month being paid
///
/// # Returns
///
/// Returns the line and eight audit steps, or an error if:
/// - The base salary cannot be parsed as a decimal (`Validation`)
/// - The month precedes the employee's joining month (`Validation`)
/// - An intermediate amount exceeds the decimal range (`Validation`)
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll_line;
/// use payroll_engine::models::{Compensation, Employee, MonthlyAggregate, YearMonth};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let employee = Employee {
///     id: Uuid::new_v4(),
///     organization_id: Uuid::new_v4(),
///     employee_code: "EMP-001".to_string(),
///     first_name: "Asha".to_string(),
///     last_name: "Rao".to_string(),
///     position: "Engineer".to_string(),
///     compensation: Compensation {
///         base_salary: "50000".to_string(),
///         tax_percent: Decimal::new(10, 0),
///         esi_percent: Decimal::new(2, 0),
///         pf_percent: Decimal::new(5, 0),
///         bonus_amount: Decimal::new(1000, 0),
///     },
///     joined_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
/// };
/// let aggregate = MonthlyAggregate {
///     employee_id: employee.id,
///     month: YearMonth::new(2026, 1).unwrap(),
///     approved_reimbursement_total: Decimal::new(200, 0),
///     total_leave_days: 0,
///     pending_leave_days: 0,
/// };
///
/// let calculation = calculate_payroll_line(&employee, &aggregate).unwrap();
/// assert_eq!(calculation.line.net_salary, Decimal::new(43050, 0));
/// assert_eq!(calculation.audit_steps.len(), 8);
/// ```
pub fn calculate_payroll_line(
    employee: &Employee,
    aggregate: &MonthlyAggregate,
) -> EngineResult<PayrollCalculation> {
    if !is_payable_in(employee, aggregate.month) {
        return Err(EngineError::validation(
            "month",
            format!(
                "{} precedes the joining month of employee {}",
                aggregate.month, employee.employee_code
            ),
        ));
    }

    let compensation = &employee.compensation;
    let mut audit_steps = Vec::with_capacity(8);

    let actual_salary = compensation.parsed_base_salary()?;
    audit_steps.push(AuditStep {
        step_number: 1,
        rule_id: "base_salary".to_string(),
        rule_name: "Base Salary".to_string(),
        input: serde_json::json!({
            "base_salary": compensation.base_salary,
        }),
        output: serde_json::json!({
            "actual_salary": actual_salary.to_string(),
        }),
        reasoning: format!("Parsed base salary {}", actual_salary),
    });

    let tax = percent_of("base_salary", actual_salary, compensation.tax_percent)?;
    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input: serde_json::json!({
            "actual_salary": actual_salary.to_string(),
            "tax_percent": compensation.tax_percent.to_string(),
        }),
        output: serde_json::json!({
            "tax": tax.to_string(),
        }),
        reasoning: format!(
            "{}% of {} rounded to whole units = {}",
            compensation.tax_percent, actual_salary, tax
        ),
    });

    let net_before = actual_salary
        .checked_sub(tax)
        .ok_or_else(|| overflow("base_salary", format!("{} - {}", actual_salary, tax)))?;
    audit_steps.push(AuditStep {
        step_number: 3,
        rule_id: "salary_after_tax".to_string(),
        rule_name: "Salary After Tax".to_string(),
        input: serde_json::json!({
            "actual_salary": actual_salary.to_string(),
            "tax": tax.to_string(),
        }),
        output: serde_json::json!({
            "net_before_deductions": net_before.to_string(),
        }),
        reasoning: format!("{} - {} = {}", actual_salary, tax, net_before),
    });

    let esi = percent_of("base_salary", net_before, compensation.esi_percent)?;
    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "esi_contribution".to_string(),
        rule_name: "ESI Contribution".to_string(),
        input: serde_json::json!({
            "net_before_deductions": net_before.to_string(),
            "esi_percent": compensation.esi_percent.to_string(),
        }),
        output: serde_json::json!({
            "esi": esi.to_string(),
        }),
        reasoning: format!(
            "{}% of {} rounded to whole units = {}",
            compensation.esi_percent, net_before, esi
        ),
    });

    let pf = percent_of("base_salary", net_before, compensation.pf_percent)?;
    audit_steps.push(AuditStep {
        step_number: 5,
        rule_id: "provident_fund".to_string(),
        rule_name: "Provident Fund".to_string(),
        input: serde_json::json!({
            "net_before_deductions": net_before.to_string(),
            "pf_percent": compensation.pf_percent.to_string(),
        }),
        output: serde_json::json!({
            "pf": pf.to_string(),
        }),
        reasoning: format!(
            "{}% of {} rounded to whole units = {}",
            compensation.pf_percent, net_before, pf
        ),
    });

    let bonus = round0(compensation.bonus_amount);
    audit_steps.push(AuditStep {
        step_number: 6,
        rule_id: "bonus".to_string(),
        rule_name: "Bonus".to_string(),
        input: serde_json::json!({
            "bonus_amount": compensation.bonus_amount.to_string(),
        }),
        output: serde_json::json!({
            "bonus": bonus.to_string(),
        }),
        reasoning: format!("Bonus of {} rounded to whole units", bonus),
    });

    let reimbursement_total = aggregate.approved_reimbursement_total;
    audit_steps.push(AuditStep {
        step_number: 7,
        rule_id: "reimbursements".to_string(),
        rule_name: "Approved Reimbursements".to_string(),
        input: serde_json::json!({
            "month": aggregate.month.to_string(),
        }),
        output: serde_json::json!({
            "reimbursement_total": reimbursement_total.to_string(),
        }),
        reasoning: format!(
            "Approved reimbursements filed in {} total {}",
            aggregate.month, reimbursement_total
        ),
    });

    let net_salary = net_before
        .checked_sub(esi)
        .and_then(|amount| amount.checked_sub(pf))
        .and_then(|amount| amount.checked_add(bonus))
        .and_then(|amount| amount.checked_add(reimbursement_total))
        .map(round2)
        .ok_or_else(|| {
            overflow(
                "reimbursement_total",
                format!(
                    "{} - {} - {} + {} + {}",
                    net_before, esi, pf, bonus, reimbursement_total
                ),
            )
        })?;
    audit_steps.push(AuditStep {
        step_number: 8,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "net_before_deductions": net_before.to_string(),
            "esi": esi.to_string(),
            "pf": pf.to_string(),
            "bonus": bonus.to_string(),
            "reimbursement_total": reimbursement_total.to_string(),
        }),
        output: serde_json::json!({
            "net_salary": net_salary.to_string(),
        }),
        reasoning: format!(
            "{} - {} - {} + {} + {} = {}",
            net_before, esi, pf, bonus, reimbursement_total, net_salary
        ),
    });

    Ok(PayrollCalculation {
        line: PayrollLine {
            employee_id: employee.id,
            month: aggregate.month,
            actual_salary,
            tax,
            pf,
            esi,
            bonus,
            reimbursement_total,
            net_salary,
        },
        audit_steps,
    })
}

/// Calculates the payroll line without keeping the audit trail.
pub fn compute_payroll_line(
    employee: &Employee,
    aggregate: &MonthlyAggregate,
) -> EngineResult<PayrollLine> {
    calculate_payroll_line(employee, aggregate).map(|calculation| calculation.line)
}
