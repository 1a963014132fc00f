//! Request types for the payroll API.
//!
//! Bodies that map one-to-one onto a domain input (`LeaveInput`,
//! `ReimbursementInput`, `NewEmployee`, `CompensationUpdate`) are accepted as
//! those types directly; the structures here cover the rest.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::PageRequest;
use crate::models::{LeaveStatus, ReimbursementStatus};
use crate::services::compensation::CompensationUpdate;

/// Query string of paged reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page; absent or invalid values mean page 1.
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }
}

/// Body of `POST /employees/{id}/check-in/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCheckInRequest {
    #[serde(default)]
    pub otp: String,
}

/// Body of the leave decision endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecisionRequest {
    pub status: LeaveStatus,
}

/// Body of the reimbursement status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimbursementStatusRequest {
    pub status: ReimbursementStatus,
}

/// Body of `PUT /organizations/{id}/compensation/selected`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCompensationRequest {
    pub employee_ids: Vec<Uuid>,
    #[serde(default)]
    pub pf_percent: Decimal,
    #[serde(default)]
    pub esi_percent: Decimal,
    #[serde(default)]
    pub tax_percent: Decimal,
    #[serde(default)]
    pub bonus_amount: Decimal,
}

impl SelectedCompensationRequest {
    pub fn update(&self) -> CompensationUpdate {
        CompensationUpdate {
            pf_percent: self.pf_percent,
            esi_percent: self.esi_percent,
            tax_percent: self.tax_percent,
            bonus_amount: self.bonus_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        assert_eq!(PageQuery::default().page().number(), 1);
        let query = PageQuery {
            page: Some("3".to_string()),
        };
        assert_eq!(query.page().number(), 3);
    }

    #[test]
    fn test_selected_compensation_defaults_missing_fields() {
        let json = r#"{
            "employeeIds": ["7d0c5b1e-2a53-4a8e-9a57-5f2f1f7f3a10"],
            "pfPercent": "12",
            "bonusAmount": 500
        }"#;
        let request: SelectedCompensationRequest = serde_json::from_str(json).unwrap();
        let update = request.update();
        assert_eq!(update.pf_percent, Decimal::from(12));
        assert_eq!(update.tax_percent, Decimal::ZERO);
        assert_eq!(update.bonus_amount, Decimal::from(500));
    }

    #[test]
    fn test_leave_decision_uses_status_names() {
        let request: LeaveDecisionRequest = serde_json::from_str(r#"{"status":"Approved"}"#).unwrap();
        assert_eq!(request.status, LeaveStatus::Approved);
    }
}
