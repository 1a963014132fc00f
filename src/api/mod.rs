//! HTTP API module for the payroll engine.
//!
//! This module exposes the attendance, leave, reimbursement, compensation and
//! salary report operations as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    LeaveDecisionRequest, PageQuery, ReimbursementStatusRequest, SelectedCompensationRequest,
    VerifyCheckInRequest,
};
pub use response::{ApiError, ApiErrorResponse, ApiSuccess};
pub use state::AppState;
