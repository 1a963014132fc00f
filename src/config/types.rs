//! Configuration types for the payroll service.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files in the configuration directory.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{Compensation, Employee, Organization};

/// Service settings from `app.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub attendance: AttendanceConfig,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

/// Check-in settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    /// How long an issued check-in code stays valid.
    #[serde(default = "default_otp_ttl_minutes")]
    pub otp_ttl_minutes: i64,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            otp_ttl_minutes: default_otp_ttl_minutes(),
        }
    }
}

fn default_otp_ttl_minutes() -> i64 {
    crate::services::attendance::DEFAULT_OTP_TTL_MINUTES
}

/// Initial data from `seed.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub organizations: Vec<SeedOrganization>,
}

/// An organization and its employees, in enumeration order.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedOrganization {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedEmployee {
    pub id: Uuid,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    pub compensation: SeedCompensation,
    pub joined_on: NaiveDate,
}

/// Compensation as written in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCompensation {
    pub base_salary: String,
    #[serde(default)]
    pub tax_percent: Decimal,
    #[serde(default)]
    pub esi_percent: Decimal,
    #[serde(default)]
    pub pf_percent: Decimal,
    #[serde(default)]
    pub bonus_amount: Decimal,
}

impl From<SeedCompensation> for Compensation {
    fn from(seed: SeedCompensation) -> Self {
        Compensation {
            base_salary: seed.base_salary,
            tax_percent: seed.tax_percent,
            esi_percent: seed.esi_percent,
            pf_percent: seed.pf_percent,
            bonus_amount: seed.bonus_amount,
        }
    }
}

impl SeedConfig {
    /// Checks every seeded compensation the way onboarding does.
    ///
    /// The error names the organization and employee code at fault.
    pub fn validate(&self) -> Result<(), String> {
        for organization in &self.organizations {
            for employee in &organization.employees {
                Compensation::from(employee.compensation.clone())
                    .validate()
                    .map_err(|e| {
                        format!(
                            "{} employee {}: {}",
                            organization.name, employee.employee_code, e
                        )
                    })?;
            }
        }
        Ok(())
    }


    /// Converts the seed into store rows: organizations with empty employee
    /// lists, and employees in the order they should be appended.
    pub fn into_rows(self) -> (Vec<Organization>, Vec<Employee>) {
        let mut organizations = Vec::with_capacity(self.organizations.len());
        let mut employees = Vec::new();
        for seed in self.organizations {
            for employee in seed.employees {
                employees.push(Employee {
                    id: employee.id,
                    organization_id: seed.id,
                    employee_code: employee.employee_code,
                    first_name: employee.first_name,
                    last_name: employee.last_name,
                    position: employee.position,
                    compensation: employee.compensation.into(),
                    joined_on: employee.joined_on,
                });
            }
            organizations.push(Organization {
                id: seed.id,
                name: seed.name,
                employees: Vec::new(),
            });
        }
        (organizations, employees)
    }
}
