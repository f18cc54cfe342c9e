//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all endpoints and the
//! router wiring them to shared state.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{AnnualSummary, BulkPayOutcome, GenerationOutcome};
use crate::error::PayrollError;
use crate::models::{Period, RecordId, SalaryRecord};
use crate::query::{ListFilter, ListResult, ListSort, MonthlyPayout, PageRequest, PendingTotals, SalarySlip};

use super::request::{
    AmendSalaryRequest, BulkDeleteRequest, BulkPayRequest, CreateSalaryRequest, GenerateRequest,
    ListParams, PayRequest, PayoutParams, PeriodParams, YearParams,
};
use super::response::{ApiError, ApiErrorResponse, DeleteManyResponse, MissingEmployeesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/salaries", post(create_salary).get(list_salaries))
        .route("/salaries/generate", post(generate_salaries))
        .route("/salaries/pay", post(bulk_pay_salaries))
        .route("/salaries/delete", post(bulk_delete_salaries))
        .route("/salaries/missing", get(missing_employees))
        .route("/salaries/pending-totals", get(pending_totals))
        .route("/salaries/monthly-payouts", get(monthly_payouts))
        .route("/salaries/:id", patch(amend_salary).delete(delete_salary))
        .route("/salaries/:id/pay", post(pay_salary))
        .route("/salaries/:id/slip", get(salary_slip))
        .route("/employees/:id/annual-summary", get(annual_summary))
        .with_state(state)
}

/// Unwraps a JSON body, mapping axum's rejection to the API error shape.
fn decode<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde.
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
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
                    ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

/// Resolves an optional request session id against the active session.
fn resolve_session(
    state: &AppState,
    session_id: Option<String>,
) -> Result<String, ApiErrorResponse> {
    session_id
        .or_else(|| state.sessions().active_session())
        .ok_or_else(|| {
            PayrollError::Validation {
                field: "session_id".to_string(),
                message: "no session id given and no active session configured".to_string(),
            }
            .into()
        })
}

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}

/// Handler for `POST /salaries`.
async fn create_salary(
    State(state): State<AppState>,
    payload: Result<Json<CreateSalaryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SalaryRecord>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = decode(correlation_id, payload)?;
    let session_id = resolve_session(&state, request.session_id.clone())?;
    let record = state
        .engine()
        .create(request.into_command(session_id))
        .map_err(|err| reject(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        record_id = %record.id,
        "salary record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for `PATCH /salaries/:id`.
async fn amend_salary(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    payload: Result<Json<AmendSalaryRequest>, JsonRejection>,
) -> Result<Json<SalaryRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = decode(correlation_id, payload)?;
    let record = state
        .engine()
        .amend(id, request.into())
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(record))
}

/// Handler for `POST /salaries/:id/pay`.
async fn pay_salary(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    payload: Result<Json<PayRequest>, JsonRejection>,
) -> Result<Json<SalaryRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = decode(correlation_id, payload)?;
    let record = state
        .engine()
        .pay(id, today_or(request.payment_date))
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(record))
}

/// Handler for `DELETE /salaries/:id`.
async fn delete_salary(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    state
        .engine()
        .delete(id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `POST /salaries/pay` (bulk).
async fn bulk_pay_salaries(
    State(state): State<AppState>,
    payload: Result<Json<BulkPayRequest>, JsonRejection>,
) -> Result<Json<BulkPayOutcome>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = decode(correlation_id, payload)?;
    let outcome = state
        .engine()
        .pay_many(&request.salary_ids, today_or(request.payment_date));
    info!(
        correlation_id = %correlation_id,
        paid = outcome.paid,
        skipped = outcome.skipped,
        "bulk pay finished"
    );
    Ok(Json(outcome))
}

/// Handler for `POST /salaries/delete` (bulk).
async fn bulk_delete_salaries(
    State(state): State<AppState>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<DeleteManyResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = decode(correlation_id, payload)?;
    let deleted = state.engine().delete_many(&request.ids);
    Ok(Json(DeleteManyResponse { deleted }))
}

/// Handler for `POST /salaries/generate`.
async fn generate_salaries(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationOutcome>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = decode(correlation_id, payload)?;
    let session_id = resolve_session(&state, request.session_id)?;
    let period = Period {
        month: request.month,
        year: request.year,
    };
    let outcome = state
        .generator()
        .generate_for_period(period, &session_id)
        .map_err(|err| reject(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        %period,
        generated = outcome.generated,
        skipped = outcome.skipped,
        "bulk generation finished"
    );
    Ok(Json(outcome))
}

/// Handler for `GET /salaries`.
async fn list_salaries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = ListFilter {
        session_id: params.session_id,
        month: params.month,
        year: params.year,
        employee_id: params.employee_id,
        status: params.status,
        search: params.search,
    };
    let sort = ListSort {
        field: params.sort_field,
        order: params.sort_order,
    };
    let page = PageRequest {
        page: params.page,
        page_size: params.page_size,
    };
    let result = state
        .query()
        .list(&filter, sort, page)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(result))
}

/// Handler for `GET /salaries/missing`.
async fn missing_employees(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<MissingEmployeesResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let session_id = resolve_session(&state, params.session_id)?;
    let period = Period {
        month: params.month,
        year: params.year,
    };
    let employees = state
        .query()
        .find_missing_employees(period, &session_id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(MissingEmployeesResponse {
        count: employees.len(),
        employees,
    }))
}

/// Handler for `GET /salaries/pending-totals`.
async fn pending_totals(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<PendingTotals>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let session_id = resolve_session(&state, params.session_id)?;
    let period = Period {
        month: params.month,
        year: params.year,
    };
    let totals = state
        .query()
        .pending_totals(period, &session_id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(totals))
}

/// Handler for `GET /salaries/monthly-payouts`.
async fn monthly_payouts(
    State(state): State<AppState>,
    Query(params): Query<PayoutParams>,
) -> Result<Json<Vec<MonthlyPayout>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let payouts = state
        .query()
        .monthly_payouts(params.year, params.session_id.as_deref())
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(payouts))
}

/// Handler for `GET /salaries/:id/slip`.
async fn salary_slip(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<SalarySlip>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let slip = state
        .query()
        .slip(id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(slip))
}

/// Handler for `GET /employees/:id/annual-summary`.
async fn annual_summary(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(params): Query<YearParams>,
) -> Result<Json<AnnualSummary>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let summary = state
        .aggregator()
        .summarize(&employee_id, params.year)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(summary))
}

/// Logs a rejected operation and converts the error for the wire.
fn reject(correlation_id: Uuid, error: PayrollError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, %error, "request rejected");
    error.into()
}
