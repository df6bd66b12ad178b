use std::time::Duration;

use axum::{http::StatusCode, response::Json};
use chrono::NaiveDate;
use common::{
    AssetValueReportRow, DepreciationMethodInfo, DepreciationReportRow, DisposalReportRow,
    ReportData, ReportType,
};
use compute::{default_regenerator, error::ComputeError, regenerate::ScheduleRegenerator};
use moka::future::Cache;
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};
use validator::ValidationErrors;

pub use common::ApiResponse;

use crate::handlers::{
    assets::{AssetHistoryResponse, AssetResponse, CreateAssetRequest, UpdateAssetRequest},
    depreciation::{
        AssetCalculationRequest, CalculationRequest, CalculationResponse,
        DepreciationRecordResponse,
    },
    disposals::{
        CreateDisposalRequest, DisposalResponse, DisposalReviewResponse, ReviewDisposalRequest,
    },
    reports::ReportResponse,
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache of stored schedules, keyed by [`schedule_cache_key`]
    pub cache: Cache<String, CachedData>,
    /// Fixed "today" for schedule regeneration; `None` uses the current date
    pub today: Option<NaiveDate>,
    /// Upper bound for a single request
    pub request_timeout: Duration,
}

impl AppState {
    pub fn regenerator(&self) -> ScheduleRegenerator {
        default_regenerator(self.today)
    }

    /// Drops the cached schedule of an asset after its records changed.
    pub async fn invalidate_schedule(&self, asset_id: i32) {
        self.cache.invalidate(&schedule_cache_key(asset_id)).await;
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Schedule(Vec<DepreciationRecordResponse>),
}

pub fn schedule_cache_key(asset_id: i32) -> String {
    format!("schedule_{}", asset_id)
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Maps a compute failure onto its HTTP status and error code.
pub fn compute_error_response(err: ComputeError) -> ApiError {
    let (status, code) = match &err {
        ComputeError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
        ComputeError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ComputeError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        ComputeError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        ComputeError::Runtime(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
    error_response(status, code, err.to_string())
}

pub fn database_error_response(context: &str, err: DbErr) -> ApiError {
    error!("{}: {}", context, err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", context)
}

pub fn validation_error_response(errors: ValidationErrors) -> ApiError {
    warn!("Request body failed validation: {}", errors);
    error_response(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", errors.to_string())
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Number of registered assets, when the database is reachable
    pub tracked_assets: Option<u64>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::assets::create_asset,
        crate::handlers::assets::get_assets,
        crate::handlers::assets::get_asset,
        crate::handlers::assets::update_asset,
        crate::handlers::assets::delete_asset,
        crate::handlers::assets::get_asset_history,
        crate::handlers::depreciation::calculate_depreciation,
        crate::handlers::depreciation::get_depreciation_methods,
        crate::handlers::depreciation::get_asset_depreciation,
        crate::handlers::depreciation::regenerate_asset_depreciation,
        crate::handlers::depreciation::calculate_asset_depreciation,
        crate::handlers::disposals::create_disposal,
        crate::handlers::disposals::review_disposal,
        crate::handlers::reports::get_report,
    ),
    components(
        schemas(
            ApiResponse<AssetResponse>,
            ApiResponse<Vec<AssetResponse>>,
            ApiResponse<AssetHistoryResponse>,
            ApiResponse<Vec<DepreciationRecordResponse>>,
            ApiResponse<DepreciationRecordResponse>,
            ApiResponse<CalculationResponse>,
            ApiResponse<Vec<DepreciationMethodInfo>>,
            ApiResponse<DisposalResponse>,
            ApiResponse<DisposalReviewResponse>,
            ApiResponse<ReportResponse>,
            ErrorResponse,
            HealthResponse,
            CreateAssetRequest,
            UpdateAssetRequest,
            AssetResponse,
            AssetHistoryResponse,
            CalculationRequest,
            AssetCalculationRequest,
            CalculationResponse,
            DepreciationRecordResponse,
            DepreciationMethodInfo,
            CreateDisposalRequest,
            ReviewDisposalRequest,
            DisposalResponse,
            DisposalReviewResponse,
            ReportResponse,
            ReportType,
            ReportData,
            AssetValueReportRow,
            DepreciationReportRow,
            DisposalReportRow,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "assets", description = "Asset registry endpoints"),
        (name = "depreciation", description = "Depreciation calculation and schedules"),
        (name = "disposals", description = "Asset disposal workflow"),
        (name = "reports", description = "Financial reports"),
    ),
    info(
        title = "AssetRust API",
        description = "Fixed asset register with depreciation schedules, disposals and reports",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
