//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_employee_salary, run_payroll};
use crate::models::{PayrollRunSummary, SalaryCalculation};

use super::request::{BatchCalculationRequest, CalculationRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/batch", post(batch_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Computes one employee's salary for a month.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let (employee_email, month, inputs) = match request.into_domain() {
        Ok(parts) => parts,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid request");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let config = state.config();
    let rules = match config.get_rules(month) {
        Ok(rules) => rules,
        Err(err) => {
            warn!(correlation_id = %correlation_id, month = %month, "No payroll rules for month");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let computation = calculate_employee_salary(&inputs, &employee_email, month, rules);
    let duration = start_time.elapsed();

    if !computation.breakdown.has_policy {
        warn!(
            correlation_id = %correlation_id,
            employee = %employee_email,
            month = %month,
            "No active salary policy"
        );
    }

    let result = SalaryCalculation::from_computation(
        computation,
        config.engine().version.clone(),
        duration.as_micros() as u64,
    );

    info!(
        correlation_id = %correlation_id,
        employee = %employee_email,
        month = %month,
        has_policy = result.breakdown.has_policy,
        net = %result.breakdown.net,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    json_ok(result)
}

/// Handler for POST /calculate/batch.
///
/// Computes salaries for every employee in the request for a month.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let (month, inputs) = match request.into_domain() {
        Ok(parts) => parts,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid request");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let config = state.config();
    let rules = match config.get_rules(month) {
        Ok(rules) => rules,
        Err(err) => {
            warn!(correlation_id = %correlation_id, month = %month, "No payroll rules for month");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let run = run_payroll(&inputs, month, rules);
    let duration = start_time.elapsed();

    if !run.missing_policy.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            month = %month,
            missing = ?run.missing_policy,
            "Employees without an active salary policy"
        );
    }

    let summary = PayrollRunSummary::from_run(
        run,
        config.engine().version.clone(),
        duration.as_micros() as u64,
    );

    info!(
        correlation_id = %correlation_id,
        month = %month,
        employees = summary.totals.employee_count,
        net = %summary.totals.net,
        duration_us = duration.as_micros(),
        "Batch calculation completed successfully"
    );

    json_ok(summary)
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the failure
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
        JsonRejection::MissingJsonContentType(_) => ApiError::missing_content_type(),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
