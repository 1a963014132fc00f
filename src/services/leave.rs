//! Leave requests: filing, editing, cancelling and deciding.

use tracing::info;
use uuid::Uuid;

use crate::calculation::{PageRequest, paginate};
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeLeavePage, EmployeeLeaves, LeaveInput, LeaveRequest, LeaveStatus, UpcomingLeavePage,
};
use crate::store::Store;

use super::{require_employee, require_organization};

/// Loads a leave request owned by `employee_id`.
///
/// Requests of other employees are reported as missing.
async fn owned_leave(
    store: &dyn Store,
    employee_id: Uuid,
    leave_id: Uuid,
) -> EngineResult<LeaveRequest> {
    store
        .leave(leave_id)
        .await?
        .filter(|leave| leave.employee_id == employee_id)
        .ok_or_else(|| EngineError::not_found("leave request", leave_id))
}

pub async fn create_leave(
    store: &dyn Store,
    clock: &dyn Clock,
    employee_id: Uuid,
    input: LeaveInput,
) -> EngineResult<LeaveRequest> {
    require_employee(store, employee_id).await?;
    let leave = LeaveRequest::new(employee_id, input, clock.now())?;
    store.insert_leave(leave.clone()).await?;

    info!(employee_id = %employee_id, leave_id = %leave.id, "Leave requested");
    Ok(leave)
}

/// Replaces the dates and reason of a request and sends it back for a decision.
pub async fn update_leave(
    store: &dyn Store,
    employee_id: Uuid,
    leave_id: Uuid,
    input: LeaveInput,
) -> EngineResult<LeaveRequest> {
    let mut leave = owned_leave(store, employee_id, leave_id).await?;
    leave.revise(input)?;
    store.save_leave(leave.clone()).await?;

    info!(employee_id = %employee_id, leave_id = %leave_id, "Leave updated");
    Ok(leave)
}

pub async fn cancel_leave(
    store: &dyn Store,
    employee_id: Uuid,
    leave_id: Uuid,
) -> EngineResult<LeaveRequest> {
    let mut leave = owned_leave(store, employee_id, leave_id).await?;
    leave.cancel()?;
    store.save_leave(leave.clone()).await?;

    info!(employee_id = %employee_id, leave_id = %leave_id, "Leave cancelled");
    Ok(leave)
}

/// Approves or rejects a pending request on behalf of the employee's organization.
pub async fn decide_leave(
    store: &dyn Store,
    organization_id: Uuid,
    leave_id: Uuid,
    decision: LeaveStatus,
) -> EngineResult<LeaveRequest> {
    let mut leave = store
        .leave(leave_id)
        .await?
        .ok_or_else(|| EngineError::not_found("leave request", leave_id))?;
    let employee = require_employee(store, leave.employee_id).await?;
    if employee.organization_id != organization_id {
        return Err(EngineError::not_found("leave request", leave_id));
    }

    leave.decide(decision)?;
    store.save_leave(leave.clone()).await?;

    info!(
        organization_id = %organization_id,
        leave_id = %leave_id,
        status = ?leave.status,
        "Leave decided"
    );
    Ok(leave)
}

pub async fn leave_by_id(
    store: &dyn Store,
    employee_id: Uuid,
    leave_id: Uuid,
) -> EngineResult<LeaveRequest> {
    owned_leave(store, employee_id, leave_id).await
}

/// Every request the employee has filed, oldest first.
pub async fn employee_leaves(
    store: &dyn Store,
    employee_id: Uuid,
) -> EngineResult<Vec<LeaveRequest>> {
    require_employee(store, employee_id).await?;
    store.leaves_for(employee_id).await
}

/// Pages through the organization's employees in enumeration order, each
/// with all of their leave requests.
pub async fn organization_leaves(
    store: &dyn Store,
    organization_id: Uuid,
    page: PageRequest,
) -> EngineResult<EmployeeLeavePage> {
    require_organization(store, organization_id).await?;
    let employees = store.employees_of(organization_id).await?;
    let window = paginate(employees.len(), page);

    let mut details = Vec::with_capacity(window.slice(&employees).len());
    for employee in window.slice(&employees) {
        details.push(EmployeeLeaves {
            employee_id: employee.id,
            employee_code: employee.employee_code.clone(),
            employee_name: employee.full_name(),
            leaves: store.leaves_for(employee.id).await?,
        });
    }
    Ok(EmployeeLeavePage {
        page: window.info(),
        employee_leave_details: details,
    })
}

/// Returns the employee's requests that have not ended yet, by start date.
pub async fn upcoming_leaves(
    store: &dyn Store,
    clock: &dyn Clock,
    employee_id: Uuid,
    page: PageRequest,
) -> EngineResult<UpcomingLeavePage> {
    require_employee(store, employee_id).await?;
    let today = clock.today();
    let mut leaves: Vec<LeaveRequest> = store
        .leaves_for(employee_id)
        .await?
        .into_iter()
        .filter(|leave| leave.end_date >= today)
        .collect();
    leaves.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then(a.created_at.cmp(&b.created_at))
    });

    let window = paginate(leaves.len(), page);
    Ok(UpcomingLeavePage {
        page: window.info(),
        upcoming_leaves: window.slice(&leaves).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::services::fixtures::{at, seeded_store};
    use chrono::{NaiveDate, NaiveTime};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn input(start: &str, end: &str) -> LeaveInput {
        LeaveInput {
            start_date: date(start),
            end_date: date(end),
            start_time: None,
            end_time: None,
            reason: "Family event".to_string(),
        }
    }

    fn clock() -> FixedClock {
        FixedClock::new(at(2026, 3, 10, 8, 0))
    }

    #[tokio::test]
    async fn test_create_leave_is_pending() {
        let (store, _, employee, _) = seeded_store();
        let leave = create_leave(&store, &clock(), employee.id, input("2026-03-20", "2026-03-22"))
            .await
            .unwrap();

        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.created_at, at(2026, 3, 10, 8, 0));
        assert_eq!(leave_by_id(&store, employee.id, leave.id).await.unwrap(), leave);
    }

    #[tokio::test]
    async fn test_create_leave_validates_ranges() {
        let (store, _, employee, _) = seeded_store();

        let reversed = create_leave(&store, &clock(), employee.id, input("2026-03-22", "2026-03-20")).await;
        assert!(matches!(reversed, Err(EngineError::Validation { .. })));

        let mut times = input("2026-03-20", "2026-03-20");
        times.start_time = NaiveTime::from_hms_opt(14, 0, 0);
        times.end_time = NaiveTime::from_hms_opt(9, 0, 0);
        let result = create_leave(&store, &clock(), employee.id, times).await;
        assert!(matches!(result, Err(EngineError::Validation { .. })));

        let mut blank = input("2026-03-20", "2026-03-20");
        blank.reason = "  ".to_string();
        let result = create_leave(&store, &clock(), employee.id, blank).await;
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_resets_decided_leave_to_pending() {
        let (store, organization, employee, _) = seeded_store();
        let leave = create_leave(&store, &clock(), employee.id, input("2026-03-20", "2026-03-22"))
            .await
            .unwrap();
        decide_leave(&store, organization.id, leave.id, LeaveStatus::Approved)
            .await
            .unwrap();

        let updated = update_leave(&store, employee.id, leave.id, input("2026-03-21", "2026-03-23"))
            .await
            .unwrap();
        assert_eq!(updated.status, LeaveStatus::Pending);
        assert_eq!(updated.start_date, date("2026-03-21"));
    }

    #[tokio::test]
    async fn test_cancelled_leave_is_final() {
        let (store, organization, employee, _) = seeded_store();
        let leave = create_leave(&store, &clock(), employee.id, input("2026-03-20", "2026-03-22"))
            .await
            .unwrap();
        cancel_leave(&store, employee.id, leave.id).await.unwrap();

        let again = cancel_leave(&store, employee.id, leave.id).await;
        assert!(matches!(again, Err(EngineError::Conflict { .. })));

        let edit = update_leave(&store, employee.id, leave.id, input("2026-03-21", "2026-03-21")).await;
        assert!(matches!(edit, Err(EngineError::Conflict { .. })));

        let decision = decide_leave(&store, organization.id, leave.id, LeaveStatus::Approved).await;
        assert!(matches!(decision, Err(EngineError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_other_employees_leave_not_found() {
        let (store, _, employee, colleague) = seeded_store();
        let leave = create_leave(&store, &clock(), employee.id, input("2026-03-20", "2026-03-22"))
            .await
            .unwrap();

        let result = cancel_leave(&store, colleague.id, leave.id).await;
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
        let result = leave_by_id(&store, colleague.id, leave.id).await;
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_decide_requires_owning_organization_and_decision() {
        let (store, _, employee, _) = seeded_store();
        let leave = create_leave(&store, &clock(), employee.id, input("2026-03-20", "2026-03-22"))
            .await
            .unwrap();

        let foreign = decide_leave(&store, Uuid::new_v4(), leave.id, LeaveStatus::Approved).await;
        assert!(matches!(foreign, Err(EngineError::NotFound { .. })));

        let (store, organization, employee, _) = seeded_store();
        let leave = create_leave(&store, &clock(), employee.id, input("2026-03-20", "2026-03-22"))
            .await
            .unwrap();
        let cancel = decide_leave(&store, organization.id, leave.id, LeaveStatus::Cancelled).await;
        assert!(matches!(cancel, Err(EngineError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_upcoming_leaves_excludes_ended_and_sorts() {
        let (store, _, employee, _) = seeded_store();
        let clock = clock();
        for (start, end) in [
            ("2026-04-01", "2026-04-02"),
            ("2026-03-01", "2026-03-05"),
            ("2026-03-08", "2026-03-10"),
            ("2026-03-15", "2026-03-15"),
        ] {
            create_leave(&store, &clock, employee.id, input(start, end)).await.unwrap();
        }

        let page = upcoming_leaves(&store, &clock, employee.id, PageRequest::default())
            .await
            .unwrap();
        let starts: Vec<String> = page
            .upcoming_leaves
            .iter()
            .map(|leave| leave.start_date.to_string())
            .collect();
        assert_eq!(starts, vec!["2026-03-08", "2026-03-15", "2026-04-01"]);
        assert_eq!(page.page.total_items, 3);
        assert_eq!(page.page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_employee_leaves_lists_every_status() {
        let (store, organization, employee, other) = seeded_store();
        let first = create_leave(&store, &clock(), employee.id, input("2026-01-05", "2026-01-06"))
            .await
            .unwrap();
        let second = create_leave(&store, &clock(), employee.id, input("2026-04-01", "2026-04-02"))
            .await
            .unwrap();
        decide_leave(&store, organization.id, first.id, LeaveStatus::Rejected)
            .await
            .unwrap();
        create_leave(&store, &clock(), other.id, input("2026-04-01", "2026-04-02"))
            .await
            .unwrap();

        let leaves = employee_leaves(&store, employee.id).await.unwrap();
        let ids: Vec<Uuid> = leaves.iter().map(|leave| leave.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(leaves[0].status, LeaveStatus::Rejected);

        let missing = employee_leaves(&store, Uuid::new_v4()).await;
        assert!(matches!(missing, Err(EngineError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_organization_leaves_paged_by_employee() {
        let (store, organization, employee, other) = seeded_store();
        create_leave(&store, &clock(), other.id, input("2026-03-20", "2026-03-21"))
            .await
            .unwrap();

        let page = organization_leaves(&store, organization.id, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.page.total_items, 2);
        assert_eq!(page.employee_leave_details[0].employee_id, employee.id);
        assert!(page.employee_leave_details[0].leaves.is_empty());
        assert_eq!(page.employee_leave_details[1].employee_code, "EMP-002");
        assert_eq!(page.employee_leave_details[1].leaves.len(), 1);

        let beyond = organization_leaves(&store, organization.id, PageRequest::new(2))
            .await
            .unwrap();
        assert!(beyond.employee_leave_details.is_empty());

        let missing = organization_leaves(&store, Uuid::new_v4(), PageRequest::default()).await;
        assert!(matches!(missing, Err(EngineError::NotFound { .. })));
    }
}
