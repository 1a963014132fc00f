//! Reimbursement aggregation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Reimbursement, ReimbursementStatus, YearMonth};

/// Sums the amounts of approved claims.
///
/// Pending and rejected claims are ignored. The sum is not rounded beyond the
/// precision the amounts were stored with. A sum beyond the decimal range is a
/// `Validation` error on `reimbursement_total`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::approved_reimbursement_total;
/// use payroll_engine::models::{Reimbursement, ReimbursementStatus};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let claim = |amount: i64, status: ReimbursementStatus| Reimbursement {
///     id: Uuid::new_v4(),
///     employee_id: Uuid::nil(),
///     description: "Travel".to_string(),
///     amount: Decimal::from(amount),
///     status,
///     created_at: Utc::now(),
/// };
/// let claims = vec![
///     claim(100, ReimbursementStatus::Approved),
///     claim(50, ReimbursementStatus::Pending),
/// ];
/// assert_eq!(approved_reimbursement_total(&claims).unwrap(), Decimal::from(100));
/// ```
pub fn approved_reimbursement_total<'a, I>(reimbursements: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = &'a Reimbursement>,
{
    reimbursements
        .into_iter()
        .filter(|reimbursement| reimbursement.status == ReimbursementStatus::Approved)
        .try_fold(Decimal::ZERO, |total, reimbursement| {
            total.checked_add(reimbursement.amount).ok_or_else(|| {
                EngineError::validation(
                    "reimbursement_total",
                    format!("{} + {} is out of range", total, reimbursement.amount),
                )
            })
        })
}

/// Returns the claims filed within the month's half-open window.
pub fn reimbursements_in_month<'a, I>(reimbursements: I, month: YearMonth) -> Vec<&'a Reimbursement>
where
    I: IntoIterator<Item = &'a Reimbursement>,
{
    reimbursements
        .into_iter()
        .filter(|reimbursement| month.contains(reimbursement.created_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn claim(amount: Decimal, status: ReimbursementStatus, created_at: DateTime<Utc>) -> Reimbursement {
        Reimbursement {
            id: Uuid::new_v4(),
            employee_id: Uuid::nil(),
            description: "Client visit".to_string(),
            amount,
            status,
            created_at,
        }
    }

    fn mid_january() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_only_approved_claims_counted() {
        let claims = vec![
            claim(dec("100"), ReimbursementStatus::Approved, mid_january()),
            claim(dec("50"), ReimbursementStatus::Pending, mid_january()),
            claim(dec("75"), ReimbursementStatus::Rejected, mid_january()),
        ];
        assert_eq!(approved_reimbursement_total(&claims).unwrap(), dec("100"));
    }

    #[test]
    fn test_keeps_stored_precision() {
        let claims = vec![
            claim(dec("10.125"), ReimbursementStatus::Approved, mid_january()),
            claim(dec("0.005"), ReimbursementStatus::Approved, mid_january()),
        ];
        assert_eq!(approved_reimbursement_total(&claims).unwrap(), dec("10.130"));
    }

    #[test]
    fn test_empty_total_is_zero() {
        let claims: Vec<Reimbursement> = Vec::new();
        assert_eq!(approved_reimbursement_total(&claims).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_reimbursements_in_month_by_created_at() {
        let claims = vec![
            claim(dec("10"), ReimbursementStatus::Approved, Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap()),
            claim(dec("20"), ReimbursementStatus::Approved, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            claim(dec("30"), ReimbursementStatus::Approved, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()),
        ];
        let january = YearMonth::new(2026, 1).unwrap();

        let in_month = reimbursements_in_month(&claims, january);
        assert_eq!(in_month.len(), 1);
        assert_eq!(approved_reimbursement_total(in_month).unwrap(), dec("20"));
    }

    #[test]
    fn test_total_beyond_decimal_range_is_validation_error() {
        let claims = vec![
            claim(Decimal::MAX, ReimbursementStatus::Approved, mid_january()),
            claim(Decimal::MAX, ReimbursementStatus::Approved, mid_january()),
        ];

        match approved_reimbursement_total(&claims) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "reimbursement_total"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejected_claims_cannot_overflow_total() {
        let claims = vec![
            claim(Decimal::MAX, ReimbursementStatus::Approved, mid_january()),
            claim(Decimal::MAX, ReimbursementStatus::Rejected, mid_january()),
        ];
        assert_eq!(approved_reimbursement_total(&claims).unwrap(), Decimal::MAX);
    }

    fn status_strategy() -> impl Strategy<Value = ReimbursementStatus> {
        prop_oneof![
            Just(ReimbursementStatus::Pending),
            Just(ReimbursementStatus::Approved),
            Just(ReimbursementStatus::Rejected),
        ]
    }

    proptest! {
        #[test]
        fn prop_total_is_order_invariant(
            entries in proptest::collection::vec((0i64..1_000_000, 0u32..3, status_strategy()), 0..30),
        ) {
            let claims: Vec<Reimbursement> = entries
                .iter()
                .map(|(units, scale, status)| claim(Decimal::new(*units, *scale), *status, mid_january()))
                .collect();
            let mut reversed = claims.clone();
            reversed.reverse();

            prop_assert_eq!(
                approved_reimbursement_total(&claims).unwrap(),
                approved_reimbursement_total(&reversed).unwrap()
            );
        }

        #[test]
        fn prop_total_matches_approved_subset(
            entries in proptest::collection::vec((0i64..1_000_000, status_strategy()), 0..30),
        ) {
            let claims: Vec<Reimbursement> = entries
                .iter()
                .map(|(units, status)| claim(Decimal::new(*units, 2), *status, mid_january()))
                .collect();
            let expected: Decimal = entries
                .iter()
                .filter(|(_, status)| *status == ReimbursementStatus::Approved)
                .map(|(units, _)| Decimal::new(*units, 2))
                .sum();

            prop_assert_eq!(approved_reimbursement_total(&claims).unwrap(), expected);
        }
    }
}
