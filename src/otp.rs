//! One-time check-in codes and their delivery.

use async_trait::async_trait;
use rand::Rng;
use tracing::info;

use crate::error::EngineResult;
use crate::models::Employee;

/// Generates a six-digit check-in code.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

/// Delivers a check-in code to the employee it was issued for.
///
/// Mail or SMS transports implement this outside the engine.
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    async fn deliver(&self, employee: &Employee, code: &str) -> EngineResult<()>;
}

/// Records the delivery in the log instead of sending it anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOtpNotifier;

#[async_trait]
impl OtpNotifier for TracingOtpNotifier {
    async fn deliver(&self, employee: &Employee, code: &str) -> EngineResult<()> {
        info!(
            employee_id = %employee.id,
            employee_code = %employee.employee_code,
            code_length = code.len(),
            "Check-in code issued"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));
        }
    }
}
