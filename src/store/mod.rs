//! Persistence port of the payroll engine.
//!
//! Services reach storage only through the [`Store`] trait. Lookups return
//! `Ok(None)` for missing rows and leave the `NotFound` decision to the
//! caller; storage failures surface as [`EngineError::Infrastructure`].
//!
//! [`EngineError::Infrastructure`]: crate::error::EngineError::Infrastructure

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, CheckInChallenge, Compensation, Employee, LeaveRequest, Organization,
    Reimbursement,
};

pub use memory::InMemoryStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn organization(&self, id: Uuid) -> EngineResult<Option<Organization>>;

    async fn employee(&self, id: Uuid) -> EngineResult<Option<Employee>>;
    /// Employees of the organization in its enumeration order.
    async fn employees_of(&self, organization_id: Uuid) -> EngineResult<Vec<Employee>>;
    /// Stores the employee and appends it to its organization's employee list.
    ///
    /// Fails with `Conflict` when the organization already has an employee
    /// with the same code.
    async fn insert_employee(&self, employee: Employee) -> EngineResult<()>;
    /// Rewrites the compensation of the listed employees of the organization,
    /// or of all of them when `employee_ids` is `None`, and returns them.
    ///
    /// Each new value is computed from the stored one in the same write.
    /// Nothing is written when any listed id is unknown or belongs to another
    /// organization.
    async fn update_compensations(
        &self,
        organization_id: Uuid,
        employee_ids: Option<&[Uuid]>,
        update: &(dyn for<'c> Fn(&'c Compensation) -> Compensation + Send + Sync),
    ) -> EngineResult<Vec<Employee>>;

    /// Inserts the record unless the employee already has an open one.
    ///
    /// Returns false, without inserting, when an open record exists.
    async fn open_attendance(&self, record: AttendanceRecord) -> EngineResult<bool>;
    async fn find_open_attendance(&self, employee_id: Uuid) -> EngineResult<Option<AttendanceRecord>>;
    /// Sets the checkout time of the employee's open record.
    ///
    /// Returns the closed record, or `None` when no record was open.
    async fn close_attendance(
        &self,
        employee_id: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<Option<AttendanceRecord>>;
    async fn attendance_for(&self, employee_id: Uuid) -> EngineResult<Vec<AttendanceRecord>>;

    async fn insert_leave(&self, leave: LeaveRequest) -> EngineResult<()>;
    async fn leave(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>>;
    async fn save_leave(&self, leave: LeaveRequest) -> EngineResult<()>;
    async fn leaves_for(&self, employee_id: Uuid) -> EngineResult<Vec<LeaveRequest>>;

    async fn insert_reimbursement(&self, reimbursement: Reimbursement) -> EngineResult<()>;
    async fn reimbursement(&self, id: Uuid) -> EngineResult<Option<Reimbursement>>;
    async fn save_reimbursement(&self, reimbursement: Reimbursement) -> EngineResult<()>;
    async fn reimbursements_for(&self, employee_id: Uuid) -> EngineResult<Vec<Reimbursement>>;

    /// Replaces any earlier challenge of the same employee.
    async fn save_check_in_challenge(&self, challenge: CheckInChallenge) -> EngineResult<()>;
    async fn check_in_challenge(&self, employee_id: Uuid) -> EngineResult<Option<CheckInChallenge>>;
    async fn clear_check_in_challenge(&self, employee_id: Uuid) -> EngineResult<()>;
}
