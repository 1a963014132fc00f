//! Operations behind the HTTP API.
//!
//! Each service function takes the collaborators it needs explicitly (the
//! [`Store`], a [`Clock`](crate::clock::Clock), an
//! [`OtpNotifier`](crate::otp::OtpNotifier)) and returns an
//! [`EngineResult`]. Presentation concerns stay in the `api` module.

pub mod attendance;
pub mod compensation;
pub mod employees;
pub mod leave;
pub mod payroll_report;
pub mod reimbursement;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Organization};
use crate::store::Store;

pub(crate) async fn require_employee(store: &dyn Store, id: Uuid) -> EngineResult<Employee> {
    store
        .employee(id)
        .await?
        .ok_or_else(|| EngineError::not_found("employee", id))
}

pub(crate) async fn require_organization(
    store: &dyn Store,
    id: Uuid,
) -> EngineResult<Organization> {
    store
        .organization(id)
        .await?
        .ok_or_else(|| EngineError::not_found("organization", id))
}
