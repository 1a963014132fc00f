//! Expense claims.

use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::calculation::{PageRequest, paginate};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    OrganizationReimbursement, Reimbursement, ReimbursementInput, ReimbursementPage,
    ReimbursementStatus,
};
use crate::store::Store;

use super::{require_employee, require_organization};

pub async fn create_reimbursement(
    store: &dyn Store,
    clock: &dyn Clock,
    employee_id: Uuid,
    input: ReimbursementInput,
) -> EngineResult<Reimbursement> {
    require_employee(store, employee_id).await?;
    let reimbursement = Reimbursement::new(employee_id, input, clock.now())?;
    store.insert_reimbursement(reimbursement.clone()).await?;

    info!(
        employee_id = %employee_id,
        reimbursement_id = %reimbursement.id,
        amount = %reimbursement.amount,
        "Reimbursement filed"
    );
    Ok(reimbursement)
}

/// Sets the status of a claim filed by an employee of the organization.
///
/// Any status may be set, including moving a decided claim back to pending.
pub async fn set_reimbursement_status(
    store: &dyn Store,
    organization_id: Uuid,
    reimbursement_id: Uuid,
    status: ReimbursementStatus,
) -> EngineResult<Reimbursement> {
    let mut reimbursement = store
        .reimbursement(reimbursement_id)
        .await?
        .ok_or_else(|| EngineError::not_found("reimbursement", reimbursement_id))?;
    let employee = require_employee(store, reimbursement.employee_id).await?;
    if employee.organization_id != organization_id {
        return Err(EngineError::not_found("reimbursement", reimbursement_id));
    }

    reimbursement.status = status;
    store.save_reimbursement(reimbursement.clone()).await?;

    info!(
        organization_id = %organization_id,
        reimbursement_id = %reimbursement_id,
        status = ?status,
        "Reimbursement status set"
    );
    Ok(reimbursement)
}

/// Pages through every claim filed by the organization's employees.
///
/// Claims are grouped by employee in enumeration order, oldest first within
/// an employee.
pub async fn organization_reimbursements(
    store: &dyn Store,
    organization_id: Uuid,
    page: PageRequest,
) -> EngineResult<ReimbursementPage> {
    require_organization(store, organization_id).await?;
    let mut claims = Vec::new();
    for employee in store.employees_of(organization_id).await? {
        let employee_name = employee.full_name();
        for reimbursement in store.reimbursements_for(employee.id).await? {
            claims.push(OrganizationReimbursement {
                employee_code: employee.employee_code.clone(),
                employee_name: employee_name.clone(),
                reimbursement,
            });
        }
    }

    let window = paginate(claims.len(), page);
    Ok(ReimbursementPage {
        page: window.info(),
        reimbursements: window.slice(&claims).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::services::fixtures::{at, dec, seeded_store};

    fn claim(amount: &str) -> ReimbursementInput {
        ReimbursementInput {
            description: "Conference travel".to_string(),
            amount: dec(amount),
        }
    }

    #[tokio::test]
    async fn test_create_is_pending_and_dated_now() {
        let (store, _, employee, _) = seeded_store();
        let clock = FixedClock::new(at(2026, 3, 31, 23, 59));

        let created = create_reimbursement(&store, &clock, employee.id, claim("120.50"))
            .await
            .unwrap();
        assert_eq!(created.status, ReimbursementStatus::Pending);
        assert_eq!(created.created_at, at(2026, 3, 31, 23, 59));
        assert_eq!(store.reimbursements_for(employee.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_amount_and_blank_description() {
        let (store, _, employee, _) = seeded_store();
        let clock = FixedClock::new(at(2026, 3, 1, 9, 0));

        let negative = create_reimbursement(&store, &clock, employee.id, claim("-1")).await;
        assert!(matches!(negative, Err(EngineError::Validation { .. })));

        let mut blank = claim("10");
        blank.description = String::new();
        let result = create_reimbursement(&store, &clock, employee.id, blank).await;
        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert!(store.reimbursements_for(employee.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_status() {
        let (store, organization, employee, _) = seeded_store();
        let clock = FixedClock::new(at(2026, 3, 1, 9, 0));
        let created = create_reimbursement(&store, &clock, employee.id, claim("80"))
            .await
            .unwrap();

        let approved = set_reimbursement_status(
            &store,
            organization.id,
            created.id,
            ReimbursementStatus::Approved,
        )
        .await
        .unwrap();
        assert_eq!(approved.status, ReimbursementStatus::Approved);

        let stored = store.reimbursement(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReimbursementStatus::Approved);
    }

    #[tokio::test]
    async fn test_set_status_unknown_or_foreign_not_found() {
        let (store, _, employee, _) = seeded_store();
        let clock = FixedClock::new(at(2026, 3, 1, 9, 0));
        let created = create_reimbursement(&store, &clock, employee.id, claim("80"))
            .await
            .unwrap();

        let foreign = set_reimbursement_status(
            &store,
            Uuid::new_v4(),
            created.id,
            ReimbursementStatus::Approved,
        )
        .await;
        assert!(matches!(foreign, Err(EngineError::NotFound { .. })));

        let (store, organization, _, _) = seeded_store();
        let missing = set_reimbursement_status(
            &store,
            organization.id,
            Uuid::new_v4(),
            ReimbursementStatus::Rejected,
        )
        .await;
        assert!(matches!(missing, Err(EngineError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_organization_reimbursements_across_employees() {
        let (store, organization, first, second) = seeded_store();
        let clock = FixedClock::new(at(2026, 3, 1, 9, 0));
        let later = create_reimbursement(&store, &clock, second.id, claim("40"))
            .await
            .unwrap();
        for amount in 1..=10 {
            create_reimbursement(&store, &clock, first.id, claim(&amount.to_string()))
                .await
                .unwrap();
        }

        let page = organization_reimbursements(&store, organization.id, PageRequest::new(1))
            .await
            .unwrap();
        assert_eq!(page.page.total_items, 11);
        assert_eq!(page.page.total_pages, 2);
        assert_eq!(page.reimbursements[0].employee_code, "EMP-001");
        assert_eq!(page.reimbursements[0].reimbursement.amount, dec("1"));

        let rest = organization_reimbursements(&store, organization.id, PageRequest::new(2))
            .await
            .unwrap();
        assert_eq!(rest.reimbursements.len(), 1);
        assert_eq!(rest.reimbursements[0].reimbursement.id, later.id);
        assert_eq!(rest.reimbursements[0].employee_code, "EMP-002");

        let missing = organization_reimbursements(&store, Uuid::new_v4(), PageRequest::default()).await;
        assert!(matches!(missing, Err(EngineError::NotFound { .. })));
    }
}
