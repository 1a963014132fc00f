//! Monthly salary reports.
//!
//! A report is paginated by month: every distinct month in which at least one
//! payable employee has attendance is one item, ascending. Within a month the
//! lines follow the organization's employee order.

use std::collections::BTreeSet;

use tracing::debug;
use uuid::Uuid;

use crate::calculation::{
    PageRequest, attendance_months, build_monthly_aggregate, compute_payroll_line, is_payable_in,
    paginate, records_in_month, reimbursements_in_month,
};
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, Employee, LeaveRequest, MonthlyPayroll, PayrollReport, PayrollReportLine,
    Reimbursement, YearMonth,
};
use crate::store::Store;

use super::{require_employee, require_organization};

/// Everything the report needs about one employee.
#[derive(Debug, Clone)]
pub struct EmployeeLedgers {
    pub employee: Employee,
    pub attendance: Vec<AttendanceRecord>,
    pub leaves: Vec<LeaveRequest>,
    pub reimbursements: Vec<Reimbursement>,
}

impl EmployeeLedgers {
    pub async fn load(store: &dyn Store, employee: Employee) -> EngineResult<Self> {
        let attendance = store.attendance_for(employee.id).await?;
        let leaves = store.leaves_for(employee.id).await?;
        let reimbursements = store.reimbursements_for(employee.id).await?;
        Ok(Self {
            employee,
            attendance,
            leaves,
            reimbursements,
        })
    }

    fn payable_months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        attendance_months(&self.attendance)
            .into_iter()
            .filter(|month| is_payable_in(&self.employee, *month))
    }

    fn line_for(&self, month: YearMonth) -> EngineResult<Option<PayrollReportLine>> {
        if !is_payable_in(&self.employee, month)
            || records_in_month(&self.attendance, month).is_empty()
        {
            return Ok(None);
        }

        let aggregate =
            build_monthly_aggregate(self.employee.id, month, &self.leaves, &self.reimbursements)?;
        let line = compute_payroll_line(&self.employee, &aggregate)?;
        Ok(Some(PayrollReportLine {
            employee_code: self.employee.employee_code.clone(),
            employee_name: self.employee.full_name(),
            line,
            total_leave_days: aggregate.total_leave_days,
            pending_leave_days: aggregate.pending_leave_days,
            reimbursements: reimbursements_in_month(&self.reimbursements, month)
                .into_iter()
                .cloned()
                .collect(),
        }))
    }
}

/// Builds one page of the report over the given employees.
///
/// `ledgers` must be in the order lines should appear within a month.
pub fn build_report(ledgers: &[EmployeeLedgers], page: PageRequest) -> EngineResult<PayrollReport> {
    let months: Vec<YearMonth> = ledgers
        .iter()
        .flat_map(EmployeeLedgers::payable_months)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let window = paginate(months.len(), page);
    let mut salary_details = Vec::with_capacity(window.slice(&months).len());
    for month in window.slice(&months) {
        let mut lines = Vec::new();
        for ledger in ledgers {
            if let Some(line) = ledger.line_for(*month)? {
                lines.push(line);
            }
        }
        salary_details.push(MonthlyPayroll {
            month: *month,
            lines,
        });
    }

    Ok(PayrollReport {
        page: window.info(),
        salary_details,
    })
}

pub async fn employee_salary_report(
    store: &dyn Store,
    employee_id: Uuid,
    page: PageRequest,
) -> EngineResult<PayrollReport> {
    let employee = require_employee(store, employee_id).await?;
    let ledgers = [EmployeeLedgers::load(store, employee).await?];
    let report = build_report(&ledgers, page)?;

    debug!(
        employee_id = %employee_id,
        page = page.number(),
        months = report.page.total_items,
        "Employee salary report built"
    );
    Ok(report)
}

pub async fn organization_salary_report(
    store: &dyn Store,
    organization_id: Uuid,
    page: PageRequest,
) -> EngineResult<PayrollReport> {
    require_organization(store, organization_id).await?;
    let mut ledgers = Vec::new();
    for employee in store.employees_of(organization_id).await? {
        ledgers.push(EmployeeLedgers::load(store, employee).await?);
    }
    let report = build_report(&ledgers, page)?;

    debug!(
        organization_id = %organization_id,
        employees = ledgers.len(),
        page = page.number(),
        months = report.page.total_items,
        "Organization salary report built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{LeaveInput, LeaveStatus, ReimbursementStatus};
    use crate::services::fixtures::{at, dec, seeded_store};
    use chrono::NaiveDate;

    fn worked(employee_id: Uuid, y: i32, m: u32, d: u32) -> AttendanceRecord {
        let mut record = AttendanceRecord::open(employee_id, at(y, m, d, 9, 0));
        record.check_out_time = Some(at(y, m, d, 17, 0));
        record
    }

    fn ledgers(employee: &Employee, attendance: Vec<AttendanceRecord>) -> EmployeeLedgers {
        EmployeeLedgers {
            employee: employee.clone(),
            attendance,
            leaves: Vec::new(),
            reimbursements: Vec::new(),
        }
    }

    fn month_labels(report: &PayrollReport) -> Vec<String> {
        report
            .salary_details
            .iter()
            .map(|month| month.month.to_string())
            .collect()
    }

    #[test]
    fn test_reference_line_in_report() {
        let (_, _, employee, _) = seeded_store();
        let mut ledger = ledgers(&employee, vec![worked(employee.id, 2026, 1, 5)]);
        ledger.reimbursements.push(Reimbursement {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            description: "Taxi".to_string(),
            amount: dec("200"),
            status: ReimbursementStatus::Approved,
            created_at: at(2026, 1, 20, 12, 0),
        });
        let mut leave = LeaveRequest::new(
            employee.id,
            LeaveInput {
                start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
                start_time: None,
                end_time: None,
                reason: "Rest".to_string(),
            },
            at(2026, 1, 2, 9, 0),
        )
        .unwrap();
        leave.status = LeaveStatus::Approved;
        ledger.leaves.push(leave);

        let report = build_report(&[ledger], PageRequest::default()).unwrap();
        assert_eq!(report.page.total_items, 1);
        let line = &report.salary_details[0].lines[0];
        assert_eq!(line.line.net_salary, dec("43050"));
        assert_eq!(line.total_leave_days, 2);
        assert_eq!(line.reimbursements.len(), 1);
        assert_eq!(line.employee_code, "EMP-001");
    }

    #[test]
    fn test_months_are_union_in_ascending_order() {
        let (_, _, first, second) = seeded_store();
        let report = build_report(
            &[
                ledgers(&first, vec![worked(first.id, 2026, 4, 1), worked(first.id, 2026, 2, 3)]),
                ledgers(&second, vec![worked(second.id, 2026, 3, 2)]),
            ],
            PageRequest::default(),
        )
        .unwrap();

        assert_eq!(month_labels(&report), vec!["2026-02", "2026-03", "2026-04"]);
        assert_eq!(report.salary_details[0].lines.len(), 1);
        assert_eq!(report.salary_details[1].lines[0].employee_code, "EMP-002");
    }

    #[test]
    fn test_lines_follow_organization_order() {
        let (_, _, first, second) = seeded_store();
        let report = build_report(
            &[
                ledgers(&first, vec![worked(first.id, 2026, 3, 2)]),
                ledgers(&second, vec![worked(second.id, 2026, 3, 3)]),
            ],
            PageRequest::default(),
        )
        .unwrap();

        let codes: Vec<&str> = report.salary_details[0]
            .lines
            .iter()
            .map(|line| line.employee_code.as_str())
            .collect();
        assert_eq!(codes, vec!["EMP-001", "EMP-002"]);
    }

    #[test]
    fn test_months_before_joining_are_skipped() {
        let (_, _, _, second) = seeded_store();
        // joined 2026-02-15
        let report = build_report(
            &[ledgers(
                &second,
                vec![worked(second.id, 2026, 1, 20), worked(second.id, 2026, 2, 16)],
            )],
            PageRequest::default(),
        )
        .unwrap();

        assert_eq!(month_labels(&report), vec!["2026-02"]);
    }

    #[test]
    fn test_pagination_by_month() {
        let (_, _, employee, _) = seeded_store();
        let attendance = (1..=12).map(|m| worked(employee.id, 2025, m, 15)).collect();
        let ledger = [ledgers(&employee, attendance)];

        let first = build_report(&ledger, PageRequest::new(1)).unwrap();
        assert_eq!(first.page.total_items, 12);
        assert_eq!(first.page.total_pages, 2);
        assert_eq!(first.salary_details.len(), 10);

        let second = build_report(&ledger, PageRequest::new(2)).unwrap();
        assert_eq!(month_labels(&second), vec!["2025-11", "2025-12"]);

        let beyond = build_report(&ledger, PageRequest::new(9)).unwrap();
        assert!(beyond.salary_details.is_empty());
        assert_eq!(beyond.page.current_page, 9);
    }

    #[test]
    fn test_unparseable_salary_fails_report() {
        let (_, _, mut employee, _) = seeded_store();
        employee.compensation.base_salary = "TBD".to_string();
        let result = build_report(
            &[ledgers(&employee, vec![worked(employee.id, 2026, 1, 5)])],
            PageRequest::default(),
        );
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_salary_beyond_decimal_range_fails_report() {
        let (_, _, mut employee, _) = seeded_store();
        employee.compensation.base_salary = "79228162514264337593543950335".to_string();
        let result = build_report(
            &[ledgers(&employee, vec![worked(employee.id, 2026, 1, 5)])],
            PageRequest::default(),
        );
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_organization_report_from_store() {
        let (store, organization, first, _) = seeded_store();
        store.open_attendance(worked(first.id, 2026, 3, 2)).await.unwrap();

        let report = organization_salary_report(&store, organization.id, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(month_labels(&report), vec!["2026-03"]);

        let missing = organization_salary_report(&store, Uuid::new_v4(), PageRequest::default()).await;
        assert!(matches!(missing, Err(EngineError::NotFound { .. })));

        let employee_report = employee_salary_report(&store, first.id, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(employee_report.salary_details[0].lines.len(), 1);
    }
}
