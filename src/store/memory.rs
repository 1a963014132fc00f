//! In-memory [`Store`] used by the binary and the tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Store;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, CheckInChallenge, Compensation, Employee, LeaveRequest, Organization,
    Reimbursement,
};

#[derive(Debug, Default)]
struct Tables {
    organizations: HashMap<Uuid, Organization>,
    employees: HashMap<Uuid, Employee>,
    attendance: Vec<AttendanceRecord>,
    leaves: Vec<LeaveRequest>,
    reimbursements: Vec<Reimbursement>,
    challenges: HashMap<Uuid, CheckInChallenge>,
}

impl Tables {
    fn add_employee(&mut self, employee: Employee) -> EngineResult<()> {
        if self.employees.contains_key(&employee.id) {
            return Err(EngineError::conflict(format!(
                "employee {} already exists",
                employee.id
            )));
        }
        let organization = self
            .organizations
            .get_mut(&employee.organization_id)
            .ok_or_else(|| EngineError::not_found("organization", employee.organization_id))?;
        let code_taken = organization.employees.iter().any(|id| {
            self.employees
                .get(id)
                .is_some_and(|existing| existing.employee_code == employee.employee_code)
        });
        if code_taken {
            return Err(EngineError::conflict(format!(
                "employee code {} is already in use",
                employee.employee_code
            )));
        }
        if !organization.employees.contains(&employee.id) {
            organization.employees.push(employee.id);
        }
        self.employees.insert(employee.id, employee);
        Ok(())
    }
}

/// A [`Store`] keeping every table behind one lock.
///
/// Clones share the same tables. Rows are kept in insertion order, so reads
/// return them oldest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given organizations and their employees.
    ///
    /// Employees are appended to their organization in the order given, after
    /// any ids the organization already lists.
    pub fn seeded(
        organizations: Vec<Organization>,
        employees: Vec<Employee>,
    ) -> EngineResult<Self> {
        let store = Self::new();
        {
            let mut tables = store.write()?;
            for organization in organizations {
                tables.organizations.insert(organization.id, organization);
            }
            for employee in employees {
                tables.add_employee(employee)?;
            }
        }
        Ok(store)
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| EngineError::infrastructure("in-memory store lock poisoned"))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| EngineError::infrastructure("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn organization(&self, id: Uuid) -> EngineResult<Option<Organization>> {
        Ok(self.read()?.organizations.get(&id).cloned())
    }

    async fn employee(&self, id: Uuid) -> EngineResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    async fn employees_of(&self, organization_id: Uuid) -> EngineResult<Vec<Employee>> {
        let tables = self.read()?;
        let Some(organization) = tables.organizations.get(&organization_id) else {
            return Ok(Vec::new());
        };
        Ok(organization
            .employees
            .iter()
            .filter_map(|id| tables.employees.get(id).cloned())
            .collect())
    }

    async fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        self.write()?.add_employee(employee)
    }

    async fn update_compensations(
        &self,
        organization_id: Uuid,
        employee_ids: Option<&[Uuid]>,
        update: &(dyn for<'c> Fn(&'c Compensation) -> Compensation + Send + Sync),
    ) -> EngineResult<Vec<Employee>> {
        let mut tables = self.write()?;
        let ids = match employee_ids {
            Some(ids) => {
                let foreign = ids.iter().find(|id| {
                    tables
                        .employees
                        .get(*id)
                        .is_none_or(|employee| employee.organization_id != organization_id)
                });
                if let Some(missing) = foreign {
                    return Err(EngineError::not_found("employee", missing));
                }
                ids.to_vec()
            }
            None => tables
                .organizations
                .get(&organization_id)
                .map(|organization| organization.employees.clone())
                .unwrap_or_default(),
        };

        let mut updated = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(employee) = tables.employees.get_mut(&id) {
                employee.compensation = update(&employee.compensation);
                updated.push(employee.clone());
            }
        }
        Ok(updated)
    }

    async fn open_attendance(&self, record: AttendanceRecord) -> EngineResult<bool> {
        let mut tables = self.write()?;
        let already_open = tables
            .attendance
            .iter()
            .any(|existing| existing.employee_id == record.employee_id && existing.is_open());
        if already_open {
            return Ok(false);
        }
        tables.attendance.push(record);
        Ok(true)
    }

    async fn find_open_attendance(&self, employee_id: Uuid) -> EngineResult<Option<AttendanceRecord>> {
        Ok(self
            .read()?
            .attendance
            .iter()
            .find(|record| record.employee_id == employee_id && record.is_open())
            .cloned())
    }

    async fn close_attendance(
        &self,
        employee_id: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<Option<AttendanceRecord>> {
        let mut tables = self.write()?;
        let open = tables
            .attendance
            .iter_mut()
            .find(|record| record.employee_id == employee_id && record.is_open());
        Ok(open.map(|record| {
            record.check_out_time = Some(at);
            record.clone()
        }))
    }

    async fn attendance_for(&self, employee_id: Uuid) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .read()?
            .attendance
            .iter()
            .filter(|record| record.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn insert_leave(&self, leave: LeaveRequest) -> EngineResult<()> {
        self.write()?.leaves.push(leave);
        Ok(())
    }

    async fn leave(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.read()?.leaves.iter().find(|leave| leave.id == id).cloned())
    }

    async fn save_leave(&self, leave: LeaveRequest) -> EngineResult<()> {
        let mut tables = self.write()?;
        let stored = tables
            .leaves
            .iter_mut()
            .find(|stored| stored.id == leave.id)
            .ok_or_else(|| EngineError::not_found("leave request", leave.id))?;
        *stored = leave;
        Ok(())
    }

    async fn leaves_for(&self, employee_id: Uuid) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self
            .read()?
            .leaves
            .iter()
            .filter(|leave| leave.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn insert_reimbursement(&self, reimbursement: Reimbursement) -> EngineResult<()> {
        self.write()?.reimbursements.push(reimbursement);
        Ok(())
    }

    async fn reimbursement(&self, id: Uuid) -> EngineResult<Option<Reimbursement>> {
        Ok(self
            .read()?
            .reimbursements
            .iter()
            .find(|reimbursement| reimbursement.id == id)
            .cloned())
    }

    async fn save_reimbursement(&self, reimbursement: Reimbursement) -> EngineResult<()> {
        let mut tables = self.write()?;
        let stored = tables
            .reimbursements
            .iter_mut()
            .find(|stored| stored.id == reimbursement.id)
            .ok_or_else(|| EngineError::not_found("reimbursement", reimbursement.id))?;
        *stored = reimbursement;
        Ok(())
    }

    async fn reimbursements_for(&self, employee_id: Uuid) -> EngineResult<Vec<Reimbursement>> {
        Ok(self
            .read()?
            .reimbursements
            .iter()
            .filter(|reimbursement| reimbursement.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn save_check_in_challenge(&self, challenge: CheckInChallenge) -> EngineResult<()> {
        self.write()?
            .challenges
            .insert(challenge.employee_id, challenge);
        Ok(())
    }

    async fn check_in_challenge(&self, employee_id: Uuid) -> EngineResult<Option<CheckInChallenge>> {
        Ok(self.read()?.challenges.get(&employee_id).cloned())
    }

    async fn clear_check_in_challenge(&self, employee_id: Uuid) -> EngineResult<()> {
        self.write()?.challenges.remove(&employee_id);
        Ok(())
    }
}
