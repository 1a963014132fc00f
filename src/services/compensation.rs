//! Organization-initiated compensation updates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Compensation, Employee, validate_rates};
use crate::store::Store;

use super::require_organization;

/// New deduction rates and bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationUpdate {
    #[serde(default)]
    pub pf_percent: Decimal,
    #[serde(default)]
    pub esi_percent: Decimal,
    #[serde(default)]
    pub tax_percent: Decimal,
    #[serde(default)]
    pub bonus_amount: Decimal,
}

impl CompensationUpdate {
    /// Checks percentages lie in `0..=100` and the bonus is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        validate_rates(
            self.tax_percent,
            self.esi_percent,
            self.pf_percent,
            self.bonus_amount,
        )
    }

    fn is_empty(&self) -> bool {
        self.pf_percent.is_zero()
            && self.esi_percent.is_zero()
            && self.tax_percent.is_zero()
            && self.bonus_amount.is_zero()
    }

    fn overwrite(&self, compensation: &Compensation) -> Compensation {
        Compensation {
            pf_percent: self.pf_percent,
            esi_percent: self.esi_percent,
            tax_percent: self.tax_percent,
            bonus_amount: self.bonus_amount,
            ..compensation.clone()
        }
    }

    /// Zero fields leave the current value in place.
    fn merge(&self, compensation: &Compensation) -> Compensation {
        let pick = |new: Decimal, current: Decimal| if new.is_zero() { current } else { new };
        Compensation {
            pf_percent: pick(self.pf_percent, compensation.pf_percent),
            esi_percent: pick(self.esi_percent, compensation.esi_percent),
            tax_percent: pick(self.tax_percent, compensation.tax_percent),
            bonus_amount: pick(self.bonus_amount, compensation.bonus_amount),
            ..compensation.clone()
        }
    }
}

/// Overwrites all four fields on each listed employee of the organization.
///
/// Nothing is written when any id is unknown or belongs to another organization.
pub async fn update_selected(
    store: &dyn Store,
    organization_id: Uuid,
    employee_ids: &[Uuid],
    update: CompensationUpdate,
) -> EngineResult<Vec<Employee>> {
    update.validate()?;
    require_organization(store, organization_id).await?;

    let updated = store
        .update_compensations(organization_id, Some(employee_ids), &|current: &Compensation| {
            update.overwrite(current)
        })
        .await?;
    info!(
        organization_id = %organization_id,
        employees = updated.len(),
        "Compensation updated for selected employees"
    );
    Ok(updated)
}

/// Applies the non-zero fields to every employee of the organization.
pub async fn update_all(
    store: &dyn Store,
    organization_id: Uuid,
    update: CompensationUpdate,
) -> EngineResult<Vec<Employee>> {
    if update.is_empty() {
        return Err(EngineError::validation(
            "compensation",
            "at least one of pf, esi, tax or bonus must be non-zero",
        ));
    }
    update.validate()?;
    require_organization(store, organization_id).await?;

    let updated = store
        .update_compensations(organization_id, None, &|current: &Compensation| {
            update.merge(current)
        })
        .await?;
    info!(
        organization_id = %organization_id,
        employees = updated.len(),
        "Compensation updated for all employees"
    );
    Ok(updated)
}
