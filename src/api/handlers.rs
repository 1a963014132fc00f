//! HTTP request handlers for the payroll API.
//!
//! This module contains the router and the handler functions for all API
//! endpoints. Handlers extract and validate the request, call one service
//! function and wrap its result in the response envelope.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::worked_hours;
use crate::error::EngineResult;
use crate::models::{LeaveInput, ReimbursementInput};
use crate::services::compensation::{self, CompensationUpdate};
use crate::services::employees::{self, NewEmployee};
use crate::services::{attendance, leave, payroll_report, reimbursement};

use super::request::{
    LeaveDecisionRequest, PageQuery, ReimbursementStatusRequest, SelectedCompensationRequest,
    VerifyCheckInRequest,
};
use super::response::{ApiError, ApiErrorResponse, ApiSuccess};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/employees/:employee_id/check-in/request",
            post(request_check_in_handler),
        )
        .route(
            "/employees/:employee_id/check-in/verify",
            post(verify_check_in_handler),
        )
        .route("/employees/:employee_id/check-out", post(check_out_handler))
        .route("/employees/:employee_id/attendance", get(attendance_handler))
        .route("/employees/:employee_id/salary", get(employee_salary_handler))
        .route(
            "/employees/:employee_id/leaves",
            get(employee_leaves_handler).post(create_leave_handler),
        )
        .route(
            "/employees/:employee_id/leaves/:leave_id",
            get(get_leave_handler).put(update_leave_handler),
        )
        .route(
            "/employees/:employee_id/leaves/:leave_id/cancel",
            post(cancel_leave_handler),
        )
        .route(
            "/employees/:employee_id/upcoming-leaves",
            get(upcoming_leaves_handler),
        )
        .route(
            "/employees/:employee_id/reimbursements",
            post(create_reimbursement_handler),
        )
        .route(
            "/organizations/:organization_id/employees",
            get(employee_page_handler).post(create_employee_handler),
        )
        .route(
            "/organizations/:organization_id/leaves",
            get(organization_leaves_handler),
        )
        .route(
            "/organizations/:organization_id/reimbursements",
            get(organization_reimbursements_handler),
        )
        .route(
            "/organizations/:organization_id/leaves/:leave_id/status",
            put(decide_leave_handler),
        )
        .route(
            "/organizations/:organization_id/reimbursements/:reimbursement_id/status",
            put(reimbursement_status_handler),
        )
        .route(
            "/organizations/:organization_id/compensation",
            put(update_all_compensation_handler),
        )
        .route(
            "/organizations/:organization_id/compensation/selected",
            put(update_selected_compensation_handler),
        )
        .route(
            "/organizations/:organization_id/salary",
            get(organization_salary_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs the outcome of a service call and renders it.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    status: StatusCode,
    result: EngineResult<ApiSuccess<T>>,
) -> HandlerResult {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros(),
                "Request completed successfully"
            );
            Ok(json_response(status, body))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            Err(err.into())
        }
    }
}

fn path_params<T>(
    correlation_id: Uuid,
    path: Result<Path<T>, PathRejection>,
) -> Result<T, ApiErrorResponse> {
    match path {
        Ok(Path(params)) => Ok(params),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
            Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                body_text,
            )))
        }
    }
}

fn json_body<T: DeserializeOwned>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn page_query(query: Result<Query<PageQuery>, QueryRejection>) -> PageQuery {
    query.map(|Query(query)| query).unwrap_or_default()
}

/// Handler for POST /employees/:employee_id/check-in/request.
async fn request_check_in_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing check-in request");

    let result = attendance::request_check_in(
        state.store(),
        state.clock(),
        state.notifier(),
        state.otp_ttl(),
        employee_id,
    )
    .await
    .map(|challenge| {
        ApiSuccess::with_message(
            "Check-in code sent",
            json!({ "expiresAt": challenge.expires_at }),
        )
    });
    respond(correlation_id, "request_check_in", started, StatusCode::OK, result)
}

/// Handler for POST /employees/:employee_id/check-in/verify.
async fn verify_check_in_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<VerifyCheckInRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    let request = json_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing check-in verification");

    let result = attendance::verify_check_in(state.store(), state.clock(), employee_id, &request.otp)
        .await
        .map(|record| ApiSuccess::with_message("Checked in", json!({ "attendance": record })));
    respond(correlation_id, "verify_check_in", started, StatusCode::CREATED, result)
}

/// Handler for POST /employees/:employee_id/check-out.
async fn check_out_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing checkout");

    let result = attendance::check_out(state.store(), state.clock(), employee_id)
        .await
        .map(|record| {
            ApiSuccess::with_message(
                "Checked out",
                json!({
                    "totalWorkedHours": worked_hours(&record),
                    "attendance": record,
                }),
            )
        });
    respond(correlation_id, "check_out", started, StatusCode::OK, result)
}

/// Handler for GET /employees/:employee_id/attendance.
async fn attendance_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    let page = page_query(query).page();

    let result = attendance::attendance_page(state.store(), employee_id, page)
        .await
        .map(ApiSuccess::new);
    respond(correlation_id, "attendance_history", started, StatusCode::OK, result)
}

/// Handler for GET /employees/:employee_id/salary.
async fn employee_salary_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    let page = page_query(query).page();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, page = page.number(), "Building salary report");

    let result = payroll_report::employee_salary_report(state.store(), employee_id, page)
        .await
        .map(ApiSuccess::new);
    respond(correlation_id, "employee_salary_report", started, StatusCode::OK, result)
}

/// Handler for POST /employees/:employee_id/leaves.
async fn create_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<LeaveInput>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    let input = json_body(correlation_id, payload)?;

    let result = leave::create_leave(state.store(), state.clock(), employee_id, input)
        .await
        .map(|leave| ApiSuccess::with_message("Leave requested", json!({ "leave": leave })));
    respond(correlation_id, "create_leave", started, StatusCode::CREATED, result)
}

/// Handler for GET /employees/:employee_id/leaves.
async fn employee_leaves_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;

    let result = leave::employee_leaves(state.store(), employee_id)
        .await
        .map(|leaves| ApiSuccess::new(json!({ "leaves": leaves })));
    respond(correlation_id, "employee_leaves", started, StatusCode::OK, result)
}

/// Handler for GET /employees/:employee_id/leaves/:leave_id.
async fn get_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let (employee_id, leave_id) = path_params(correlation_id, path)?;

    let result = leave::leave_by_id(state.store(), employee_id, leave_id)
        .await
        .map(|leave| ApiSuccess::new(json!({ "leave": leave })));
    respond(correlation_id, "get_leave", started, StatusCode::OK, result)
}

/// Handler for PUT /employees/:employee_id/leaves/:leave_id.
async fn update_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<LeaveInput>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let (employee_id, leave_id) = path_params(correlation_id, path)?;
    let input = json_body(correlation_id, payload)?;

    let result = leave::update_leave(state.store(), employee_id, leave_id, input)
        .await
        .map(|leave| ApiSuccess::with_message("Leave updated", json!({ "leave": leave })));
    respond(correlation_id, "update_leave", started, StatusCode::OK, result)
}

/// Handler for POST /employees/:employee_id/leaves/:leave_id/cancel.
async fn cancel_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let (employee_id, leave_id) = path_params(correlation_id, path)?;

    let result = leave::cancel_leave(state.store(), employee_id, leave_id)
        .await
        .map(|leave| ApiSuccess::with_message("Leave cancelled", json!({ "leave": leave })));
    respond(correlation_id, "cancel_leave", started, StatusCode::OK, result)
}

/// Handler for GET /employees/:employee_id/upcoming-leaves.
async fn upcoming_leaves_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    let page = page_query(query).page();

    let result = leave::upcoming_leaves(state.store(), state.clock(), employee_id, page)
        .await
        .map(ApiSuccess::new);
    respond(correlation_id, "upcoming_leaves", started, StatusCode::OK, result)
}

/// Handler for POST /employees/:employee_id/reimbursements.
async fn create_reimbursement_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReimbursementInput>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let employee_id = path_params(correlation_id, path)?;
    let input = json_body(correlation_id, payload)?;

    let result =
        reimbursement::create_reimbursement(state.store(), state.clock(), employee_id, input)
            .await
            .map(|reimbursement| {
                ApiSuccess::with_message(
                    "Reimbursement submitted",
                    json!({ "reimbursement": reimbursement }),
                )
            });
    respond(correlation_id, "create_reimbursement", started, StatusCode::CREATED, result)
}

/// Handler for POST /organizations/:organization_id/employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let organization_id = path_params(correlation_id, path)?;
    let input = json_body(correlation_id, payload)?;

    let result = employees::create_employee(state.store(), organization_id, input)
        .await
        .map(|employee| ApiSuccess::with_message("Employee created", json!({ "employee": employee })));
    respond(correlation_id, "create_employee", started, StatusCode::CREATED, result)
}

/// Handler for GET /organizations/:organization_id/employees.
async fn employee_page_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let organization_id = path_params(correlation_id, path)?;
    let page = page_query(query).page();

    let result = employees::employee_page(state.store(), organization_id, page)
        .await
        .map(ApiSuccess::new);
    respond(correlation_id, "list_employees", started, StatusCode::OK, result)
}

/// Handler for GET /organizations/:organization_id/leaves.
async fn organization_leaves_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let organization_id = path_params(correlation_id, path)?;
    let page = page_query(query).page();

    let result = leave::organization_leaves(state.store(), organization_id, page)
        .await
        .map(ApiSuccess::new);
    respond(correlation_id, "organization_leaves", started, StatusCode::OK, result)
}

/// Handler for GET /organizations/:organization_id/reimbursements.
async fn organization_reimbursements_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let organization_id = path_params(correlation_id, path)?;
    let page = page_query(query).page();

    let result = reimbursement::organization_reimbursements(state.store(), organization_id, page)
        .await
        .map(ApiSuccess::new);
    respond(correlation_id, "organization_reimbursements", started, StatusCode::OK, result)
}

/// Handler for PUT /organizations/:organization_id/leaves/:leave_id/status.
async fn decide_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<LeaveDecisionRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let (organization_id, leave_id) = path_params(correlation_id, path)?;
    let request = json_body(correlation_id, payload)?;

    let result = leave::decide_leave(state.store(), organization_id, leave_id, request.status)
        .await
        .map(|leave| ApiSuccess::with_message("Leave status updated", json!({ "leave": leave })));
    respond(correlation_id, "decide_leave", started, StatusCode::OK, result)
}

/// Handler for PUT /organizations/:organization_id/reimbursements/:reimbursement_id/status.
async fn reimbursement_status_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<ReimbursementStatusRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let (organization_id, reimbursement_id) = path_params(correlation_id, path)?;
    let request = json_body(correlation_id, payload)?;

    let result = reimbursement::set_reimbursement_status(
        state.store(),
        organization_id,
        reimbursement_id,
        request.status,
    )
    .await
    .map(|reimbursement| {
        ApiSuccess::with_message(
            "Reimbursement status updated",
            json!({ "reimbursement": reimbursement }),
        )
    });
    respond(correlation_id, "reimbursement_status", started, StatusCode::OK, result)
}

/// Handler for PUT /organizations/:organization_id/compensation.
async fn update_all_compensation_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CompensationUpdate>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let organization_id = path_params(correlation_id, path)?;
    let update = json_body(correlation_id, payload)?;

    let result = compensation::update_all(state.store(), organization_id, update)
        .await
        .map(|updated| {
            ApiSuccess::with_message("Compensation updated", json!({ "employees": updated }))
        });
    respond(correlation_id, "update_all_compensation", started, StatusCode::OK, result)
}

/// Handler for PUT /organizations/:organization_id/compensation/selected.
async fn update_selected_compensation_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SelectedCompensationRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let organization_id = path_params(correlation_id, path)?;
    let request = json_body(correlation_id, payload)?;

    let result = compensation::update_selected(
        state.store(),
        organization_id,
        &request.employee_ids,
        request.update(),
    )
    .await
    .map(|updated| {
        ApiSuccess::with_message("Compensation updated", json!({ "employees": updated }))
    });
    respond(correlation_id, "update_selected_compensation", started, StatusCode::OK, result)
}

/// Handler for GET /organizations/:organization_id/salary.
async fn organization_salary_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let organization_id = path_params(correlation_id, path)?;
    let page = page_query(query).page();
    info!(
        correlation_id = %correlation_id,
        organization_id = %organization_id,
        page = page.number(),
        "Building organization salary report"
    );

    let result = payroll_report::organization_salary_report(state.store(), organization_id, page)
        .await
        .map(ApiSuccess::new);
    respond(correlation_id, "organization_salary_report", started, StatusCode::OK, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::otp::TracingOtpNotifier;
    use crate::store::InMemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        AppState::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(clock),
            Arc::new(TracingOtpNotifier),
            Duration::minutes(10),
        )
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let uri = format!("/employees/{}/leaves", Uuid::new_v4());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
        assert!(!error.success);
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let uri = format!("/employees/{}/reimbursements", Uuid::new_v4());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"description":"Taxi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_invalid_path_id_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/employees/not-a-uuid/check-out")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_employee_returns_404() {
        let router = create_router(create_test_state());
        let uri = format!("/employees/{}/salary?page=2", Uuid::new_v4());

        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
