//! Reimbursement (expense claim) model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Approval state of a reimbursement claim. Only the organization changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReimbursementStatus {
    /// Awaiting review.
    Pending,
    /// Approved; counted in payroll.
    Approved,
    /// Rejected; never paid.
    Rejected,
}

/// The fields an employee submits with a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReimbursementInput {
    /// What the expense was for.
    pub description: String,
    /// Claimed amount.
    pub amount: Decimal,
}

impl ReimbursementInput {
    /// Checks the description is present and the amount is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.description.trim().is_empty() {
            return Err(EngineError::validation("description", "missing required field"));
        }
        if self.amount < Decimal::ZERO {
            return Err(EngineError::validation(
                "amount",
                format!("{} is negative", self.amount),
            ));
        }
        Ok(())
    }
}

/// An expense claim filed by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reimbursement {
    /// Unique identifier for the claim.
    pub id: Uuid,
    /// The claiming employee.
    pub employee_id: Uuid,
    /// What the expense was for.
    pub description: String,
    /// Claimed amount, never negative.
    pub amount: Decimal,
    /// Current approval state.
    pub status: ReimbursementStatus,
    /// When the claim was filed. Decides which payroll month it belongs to.
    pub created_at: DateTime<Utc>,
}

impl Reimbursement {
    /// Creates a pending claim from validated input.
    pub fn new(
        employee_id: Uuid,
        input: ReimbursementInput,
        created_at: DateTime<Utc>,
    ) -> EngineResult<Self> {
        input.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            description: input.description,
            amount: input.amount,
            status: ReimbursementStatus::Pending,
            created_at,
        })
    }
}
