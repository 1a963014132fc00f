//! Employee model and related types.
//!
//! This module defines the [`Organization`] tenant, the [`Employee`] it owns
//! and the [`Compensation`] parameters the payroll engine reads.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The tenant that owns employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique identifier for the organization.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Employee ids in enumeration order. Reports list employees in this order.
    #[serde(default)]
    pub employees: Vec<Uuid>,
}

/// Compensation parameters of an employee.
///
/// The base salary is kept in the textual form it was entered in and parsed
/// when a payroll line is computed; an unparseable value fails that
/// computation instead of being coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    /// Monthly base salary as entered (e.g. `"50000"`).
    pub base_salary: String,
    /// Income tax, as a percentage of the base salary.
    #[serde(default)]
    pub tax_percent: Decimal,
    /// ESI contribution, as a percentage of the post-tax salary.
    #[serde(default)]
    pub esi_percent: Decimal,
    /// Provident fund contribution, as a percentage of the post-tax salary.
    #[serde(default)]
    pub pf_percent: Decimal,
    /// Flat monthly bonus.
    #[serde(default)]
    pub bonus_amount: Decimal,
}

impl Compensation {
    /// Creates compensation with the given base salary and no deductions or bonus.
    pub fn with_base_salary(base_salary: impl Into<String>) -> Self {
        Self {
            base_salary: base_salary.into(),
            tax_percent: Decimal::ZERO,
            esi_percent: Decimal::ZERO,
            pf_percent: Decimal::ZERO,
            bonus_amount: Decimal::ZERO,
        }
    }

    /// Parses the base salary as a decimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Compensation;
    /// use rust_decimal::Decimal;
    ///
    /// let compensation = Compensation::with_base_salary("50000.50");
    /// assert_eq!(compensation.parsed_base_salary().unwrap(), Decimal::new(5000050, 2));
    ///
    /// let broken = Compensation::with_base_salary("fifty thousand");
    /// assert!(broken.parsed_base_salary().is_err());
    /// ```
    pub fn parsed_base_salary(&self) -> EngineResult<Decimal> {
        Decimal::from_str(self.base_salary.trim()).map_err(|_| {
            EngineError::validation(
                "base_salary",
                format!("'{}' is not a number", self.base_salary),
            )
        })
    }

    /// Checks the salary parses and is not negative, the percentages lie in
    /// `0..=100` and the bonus is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        let salary = self.parsed_base_salary()?;
        if salary < Decimal::ZERO {
            return Err(EngineError::validation(
                "base_salary",
                format!("{} is negative", salary),
            ));
        }
        validate_rates(
            self.tax_percent,
            self.esi_percent,
            self.pf_percent,
            self.bonus_amount,
        )
    }
}

/// Range checks shared by stored compensation and compensation updates.
pub(crate) fn validate_rates(
    tax_percent: Decimal,
    esi_percent: Decimal,
    pf_percent: Decimal,
    bonus_amount: Decimal,
) -> EngineResult<()> {
    for (field, percent) in [
        ("tax_percent", tax_percent),
        ("esi_percent", esi_percent),
        ("pf_percent", pf_percent),
    ] {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(EngineError::validation(
                field,
                format!("{} is outside 0..=100", percent),
            ));
        }
    }
    if bonus_amount < Decimal::ZERO {
        return Err(EngineError::validation(
            "bonus_amount",
            format!("{} is negative", bonus_amount),
        ));
    }
    Ok(())
}

/// Represents an employee of an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The organization the employee belongs to.
    pub organization_id: Uuid,
    /// Organization-scoped employee code (e.g., "EMP-001").
    pub employee_code: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job title.
    pub position: String,
    /// Compensation parameters used by the payroll engine.
    pub compensation: Compensation,
    /// The date the employee joined. No payroll is produced for earlier months.
    pub joined_on: NaiveDate,
}

impl Employee {
    /// Returns "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
