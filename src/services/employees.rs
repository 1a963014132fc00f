//! Employee onboarding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculation::{PageRequest, paginate};
use crate::error::{EngineError, EngineResult};
use crate::models::{Compensation, Employee, EmployeePage};
use crate::store::Store;

use super::require_organization;

/// The fields an organization submits to onboard an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    pub compensation: Compensation,
    pub joined_on: NaiveDate,
}

impl NewEmployee {
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("employee_code", &self.employee_code),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::validation(field, "missing required field"));
            }
        }
        self.compensation.validate()
    }
}

/// Adds an employee to the end of the organization's employee list.
///
/// The store rejects a code already used in the organization.
pub async fn create_employee(
    store: &dyn Store,
    organization_id: Uuid,
    input: NewEmployee,
) -> EngineResult<Employee> {
    input.validate()?;
    require_organization(store, organization_id).await?;

    let employee = Employee {
        id: Uuid::new_v4(),
        organization_id,
        employee_code: input.employee_code.trim().to_string(),
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        position: input.position.trim().to_string(),
        compensation: input.compensation,
        joined_on: input.joined_on,
    };
    store.insert_employee(employee.clone()).await?;

    info!(
        organization_id = %organization_id,
        employee_id = %employee.id,
        employee_code = %employee.employee_code,
        "Employee created"
    );
    Ok(employee)
}

/// Lists the organization's employees in enumeration order.
pub async fn employee_page(
    store: &dyn Store,
    organization_id: Uuid,
    page: PageRequest,
) -> EngineResult<EmployeePage> {
    require_organization(store, organization_id).await?;
    let employees = store.employees_of(organization_id).await?;
    let window = paginate(employees.len(), page);
    Ok(EmployeePage {
        page: window.info(),
        employees: window.slice(&employees).to_vec(),
    })
}
