//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! request is tagged with a correlation id that appears in every log line
//! it produces.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::ledger::{
    self, MarkAttendance, NewWorker, PaymentEntry, compute_monthly_earnings, generate_payroll,
    get_ledger, get_worker_with_rate, list_payroll, mark_payroll_paid, mark_payroll_unpaid,
    record_payment, worker_history,
};
use crate::models::PayrollMonth;
use crate::store::AttendanceFilter;

use super::request::{
    AttendanceQuery, CreateWorkerRequest, GeneratePayrollRequest, MarkAttendanceRequest,
    MonthQuery, PaymentRequest, PayrollQuery, SetRateRequest, parse_optional_date,
    parse_optional_month,
};
use super::response::{ApiError, ApiErrorResponse, GeneratePayrollResponse, WorkerResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/workers",
            post(create_worker_handler).get(list_workers_handler),
        )
        .route("/workers/:worker_id", get(get_worker_handler))
        .route("/workers/:worker_id/rates", put(set_rate_handler))
        .route(
            "/attendance",
            post(mark_attendance_handler).get(list_attendance_handler),
        )
        .route("/payroll", get(list_payroll_handler))
        .route("/payroll/generate", post(generate_payroll_handler))
        .route("/payroll/pay", post(record_payment_handler))
        .route("/payroll/ledger/:worker_id", get(ledger_handler))
        .route("/payroll/earnings/:worker_id", get(earnings_handler))
        .route(
            "/payroll/worker-history/:worker_id",
            get(worker_history_handler),
        )
        .route(
            "/payroll/:worker_id/:month/mark_paid",
            patch(mark_paid_handler),
        )
        .route(
            "/payroll/:worker_id/:month/mark_unpaid",
            patch(mark_unpaid_handler),
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

/// Logs the outcome of an engine call and renders it.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                status = status.as_u16(),
                "Request completed"
            );
            json_response(status, body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON body rejection to a 400 response.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
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
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Query string rejected"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
        .into_response()
}

/// Unwraps an extractor, or returns the rejection response from the handler.
macro_rules! extract_or_reject {
    ($extracted:expr, $correlation_id:expr, $on_reject:path) => {
        match $extracted {
            Ok(value) => value,
            Err(rejection) => return $on_reject($correlation_id, rejection),
        }
    };
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(StatusCode::OK, json!({ "status": "ok" }))
}

/// Handler for POST /workers.
async fn create_worker_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkerRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create worker request");

    let Json(request) = extract_or_reject!(payload, correlation_id, json_rejection_response);
    let new_worker: NewWorker = request.into();
    let store = state.store();

    let result = ledger::create_worker(store, new_worker)
        .and_then(|worker| get_worker_with_rate(store, &worker.id))
        .map(|(worker, rate)| WorkerResponse { worker, rate });
    respond(correlation_id, "create_worker", StatusCode::CREATED, result)
}

/// Handler for GET /workers.
async fn list_workers_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.store().list_workers();
    respond(correlation_id, "list_workers", StatusCode::OK, result)
}

/// Handler for GET /workers/:worker_id.
async fn get_worker_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = get_worker_with_rate(state.store(), &worker_id)
        .map(|(worker, rate)| WorkerResponse { worker, rate });
    respond(correlation_id, "get_worker", StatusCode::OK, result)
}

/// Handler for PUT /workers/:worker_id/rates.
async fn set_rate_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    payload: Result<Json<SetRateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        worker_id = %worker_id,
        "Processing rate card update"
    );

    let Json(request) = extract_or_reject!(payload, correlation_id, json_rejection_response);
    let result = ledger::set_rate(state.store(), request.into_rate(worker_id));
    respond(correlation_id, "set_rate", StatusCode::OK, result)
}

/// Handler for POST /attendance.
async fn mark_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance request");

    let Json(request) = extract_or_reject!(payload, correlation_id, json_rejection_response);
    let result = MarkAttendance::try_from(request)
        .and_then(|mark| ledger::mark_attendance(state.store(), mark));
    respond(correlation_id, "mark_attendance", StatusCode::CREATED, result)
}

/// Handler for GET /attendance.
async fn list_attendance_handler(
    State(state): State<AppState>,
    query: Result<Query<AttendanceQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = extract_or_reject!(query, correlation_id, query_rejection_response);

    let page_size = state.settings().payroll.attendance_page_size;
    let result = parse_optional_date(query.date.as_deref()).and_then(|date| {
        let filter = AttendanceFilter {
            date,
            worker_id: query.worker.filter(|w| !w.trim().is_empty()),
            worksite_id: query.worksite.filter(|w| !w.trim().is_empty()),
        };
        ledger::list_attendance(
            state.store(),
            &filter,
            query.page.unwrap_or(1),
            page_size,
        )
    });
    respond(correlation_id, "list_attendance", StatusCode::OK, result)
}

/// Handler for POST /payroll/generate.
async fn generate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let Json(request) = extract_or_reject!(payload, correlation_id, json_rejection_response);

    let start_time = Instant::now();
    let max_attempts = state.settings().payroll.max_upsert_attempts;
    let result = request
        .month
        .trim()
        .parse::<PayrollMonth>()
        .and_then(|month| {
            generate_payroll(state.store(), month, max_attempts).map(|summaries| {
                GeneratePayrollResponse {
                    month,
                    count: summaries.len(),
                    summaries,
                }
            })
        });

    if let Ok(response) = &result {
        info!(
            correlation_id = %correlation_id,
            month = %response.month,
            summaries = response.count,
            duration_us = start_time.elapsed().as_micros(),
            "Payroll generation finished"
        );
    }
    respond(correlation_id, "generate_payroll", StatusCode::OK, result)
}

/// Handler for GET /payroll.
async fn list_payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = extract_or_reject!(query, correlation_id, query_rejection_response);

    let result = parse_optional_month(query.month.as_deref())
        .and_then(|month| list_payroll(state.store(), month, query.worker.as_deref()));
    respond(correlation_id, "list_payroll", StatusCode::OK, result)
}

/// Handler for POST /payroll/pay.
async fn record_payment_handler(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payment request");

    let Json(request) = extract_or_reject!(payload, correlation_id, json_rejection_response);
    let result =
        PaymentEntry::try_from(request).and_then(|entry| record_payment(state.store(), entry));
    respond(correlation_id, "record_payment", StatusCode::CREATED, result)
}

/// Handler for GET /payroll/ledger/:worker_id.
async fn ledger_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = extract_or_reject!(query, correlation_id, query_rejection_response);

    let result = query
        .required()
        .and_then(|month| get_ledger(state.store(), &worker_id, month));
    respond(correlation_id, "get_ledger", StatusCode::OK, result)
}

/// Handler for GET /payroll/earnings/:worker_id.
async fn earnings_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = extract_or_reject!(query, correlation_id, query_rejection_response);

    let result = query
        .required()
        .and_then(|month| compute_monthly_earnings(state.store(), &worker_id, month));
    respond(correlation_id, "compute_monthly_earnings", StatusCode::OK, result)
}

/// Handler for GET /payroll/worker-history/:worker_id.
async fn worker_history_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = worker_history(state.store(), &worker_id);
    respond(correlation_id, "worker_history", StatusCode::OK, result)
}

fn parse_path_month(month: &str) -> EngineResult<PayrollMonth> {
    month.parse().map_err(|err: EngineError| {
        warn!(month, "Malformed month in path");
        err
    })
}

/// Handler for PATCH /payroll/:worker_id/:month/mark_paid.
async fn mark_paid_handler(
    State(state): State<AppState>,
    Path((worker_id, month)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = parse_path_month(&month)
        .and_then(|month| mark_payroll_paid(state.store(), &worker_id, month));
    respond(correlation_id, "mark_paid", StatusCode::OK, result)
}

/// Handler for PATCH /payroll/:worker_id/:month/mark_unpaid.
async fn mark_unpaid_handler(
    State(state): State<AppState>,
    Path((worker_id, month)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = parse_path_month(&month)
        .and_then(|month| mark_payroll_unpaid(state.store(), &worker_id, month));
    respond(correlation_id, "mark_unpaid", StatusCode::OK, result)
}
