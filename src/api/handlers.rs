//! HTTP request handlers for the Payslip Engine API.
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

use crate::models::PayslipRecord;
use crate::pipeline::payslip_file_name;
use crate::render::PDF_CONTENT_TYPE;

use super::request::RenderRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslips/totals", post(totals_handler))
        .route("/payslips/render", post(render_handler))
        .with_state(state)
}

/// Handler for POST /payslips/totals.
///
/// Normalises the record and returns its computed totals. Stored totals in
/// the record are ignored apart from a logged mismatch warning.
async fn totals_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRecord>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing totals request");

    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let computation = state.generator().compute(&record);
    info!(
        correlation_id = %correlation_id,
        payslip_id = %record.id,
        gross_pay = %computation.totals.gross_pay,
        net_pay = %computation.totals.net_pay,
        warnings = computation.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Totals computed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(computation.totals),
    )
        .into_response()
}

/// Handler for POST /payslips/render.
///
/// Generates the PDF on a blocking worker thread and returns it as a
/// download named after the employee and payment date.
async fn render_handler(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing render request");

    let RenderRequest { payslip, company } = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let file_name = payslip_file_name(&payslip.employee.employee_id, payslip.payment_date, "pdf");
    let payslip_id = payslip.id;
    let generator = state.shared_generator();

    let start_time = Instant::now();
    let outcome =
        tokio::task::spawn_blocking(move || generator.generate_document(&payslip, &company)).await;

    match outcome {
        Ok(Ok(document)) => {
            info!(
                correlation_id = %correlation_id,
                payslip_id = %payslip_id,
                file_name = %file_name,
                bytes = document.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payslip rendered"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name),
                    ),
                ],
                document.into_bytes(),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                payslip_id = %payslip_id,
                error = %err,
                "Payslip rendering failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                payslip_id = %payslip_id,
                error = %join_error,
                "Payslip rendering task did not complete"
            );
            ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::generation_aborted(),
            )
            .into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
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
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}
