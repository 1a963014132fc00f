//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::otp::OtpNotifier;
use crate::store::Store;

/// Shared application state.
///
/// Holds the collaborators every service call is given: the store, the
/// clock, the check-in code notifier and the code lifetime.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn OtpNotifier>,
    otp_ttl: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn OtpNotifier>,
        otp_ttl: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            notifier,
            otp_ttl,
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn notifier(&self) -> &dyn OtpNotifier {
        self.notifier.as_ref()
    }

    pub fn otp_ttl(&self) -> Duration {
        self.otp_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
