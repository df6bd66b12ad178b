use crate::schemas::{
    ApiError, ApiResponse, AppState, ErrorResponse, compute_error_response, error_response,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use common::{ReportData, ReportType};
use compute::reports::report;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for reports
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ReportQuery {
    /// asset-value, depreciation or disposal
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 32))]
    pub report_type: String,
    /// First day of the period (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// Last day of the period (YYYY-MM-DD), inclusive
    pub end_date: NaiveDate,
}

/// A generated report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub report_type: ReportType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub row_count: usize,
    pub rows: ReportData,
}

/// Generate a financial report for a period
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report generated successfully", body = ApiResponse<ReportResponse>),
        (status = 400, description = "Invalid report type or period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_report(
    Valid(Query(query)): Valid<Query<ReportQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponse>>), ApiError> {
    trace!("Entering get_report function");

    let report_type: ReportType = query.report_type.parse().map_err(|e: String| {
        warn!("{}", e);
        error_response(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", e)
    })?;

    let rows = report(&state.db, report_type, query.start_date, query.end_date)
        .await
        .map_err(compute_error_response)?;

    info!(
        "Generated {} report for {}..={} with {} rows",
        report_type,
        query.start_date,
        query.end_date,
        rows.len()
    );
    let response = ReportResponse {
        report_type,
        start_date: query.start_date,
        end_date: query.end_date,
        row_count: rows.len(),
        rows,
    };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(response, "Report generated successfully")),
    ))
}
