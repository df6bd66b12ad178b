use crate::schemas::{
    ApiError, ApiResponse, AppState, CachedData, ErrorResponse, compute_error_response,
    schedule_cache_key, validation_error_response,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::DepreciationMethodInfo;
use compute::depreciation::{DepreciationResult, calculate, method_catalogue, parse_method};
use compute::regenerate::stored_schedule;
use model::entities::depreciation_record;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

/// One stored schedule year
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DepreciationRecordResponse {
    pub id: i32,
    pub asset_id: i32,
    /// Calendar year
    pub year: i32,
    pub amount: Decimal,
    pub accumulated_depreciation: Decimal,
    pub book_value: Decimal,
}

impl From<depreciation_record::Model> for DepreciationRecordResponse {
    fn from(model: depreciation_record::Model) -> Self {
        Self {
            id: model.id,
            asset_id: model.asset_id,
            year: model.year,
            amount: model.amount,
            accumulated_depreciation: model.accumulated_depreciation,
            book_value: model.book_value,
        }
    }
}

/// Request body for a stateless depreciation calculation
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CalculationRequest {
    pub cost: Decimal,
    pub salvage_value: Decimal,
    /// Useful life in years
    #[validate(range(min = 1, max = 1000))]
    pub useful_life: i32,
    /// STRAIGHT_LINE, DECLINING_BALANCE or UNITS_OF_PRODUCTION
    pub depreciation_method: String,
    /// 1-based year of service
    #[validate(range(min = 1, max = 1000))]
    pub year: i32,
    /// Units produced in the period (units of production only)
    pub units_produced: Option<Decimal>,
    /// Lifetime production estimate (units of production only)
    pub total_estimated_units: Option<Decimal>,
}

/// Request body for calculating and storing one year of an asset's schedule
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct AssetCalculationRequest {
    /// Calendar year, not earlier than the purchase year
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    /// Units produced in that year (units of production only)
    pub units_produced: Option<Decimal>,
    /// Overrides the asset's lifetime production estimate
    pub total_estimated_units: Option<Decimal>,
}

/// Figures for a single year of service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CalculationResponse {
    pub yearly_depreciation: Decimal,
    pub accumulated_depreciation: Decimal,
    pub book_value: Decimal,
}

impl From<DepreciationResult> for CalculationResponse {
    fn from(result: DepreciationResult) -> Self {
        Self {
            yearly_depreciation: result.yearly_depreciation,
            accumulated_depreciation: result.accumulated_depreciation,
            book_value: result.book_value,
        }
    }
}

/// Calculate one year of depreciation without touching stored data
#[utoipa::path(
    post,
    path = "/api/v1/depreciation/calculate",
    tag = "depreciation",
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Depreciation calculated", body = ApiResponse<CalculationResponse>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn calculate_depreciation(
    Json(request): Json<CalculationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CalculationResponse>>), ApiError> {
    trace!("Entering calculate_depreciation function");
    request.validate().map_err(validation_error_response)?;

    let method = parse_method(&request.depreciation_method).map_err(compute_error_response)?;
    let result = calculate(
        request.cost,
        request.salvage_value,
        request.useful_life,
        method,
        request.year,
        request.units_produced,
        request.total_estimated_units,
    )
    .map_err(compute_error_response)?;

    debug!(
        "Year {} of {}: charge {}, book value {}",
        request.year, request.depreciation_method, result.yearly_depreciation, result.book_value
    );
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            CalculationResponse::from(result),
            "Depreciation calculated successfully",
        )),
    ))
}

/// List the supported depreciation methods
#[utoipa::path(
    get,
    path = "/api/v1/depreciation-methods",
    tag = "depreciation",
    responses(
        (status = 200, description = "Supported methods", body = ApiResponse<Vec<DepreciationMethodInfo>>)
    )
)]
#[instrument]
pub async fn get_depreciation_methods() -> Json<ApiResponse<Vec<DepreciationMethodInfo>>> {
    Json(ApiResponse::ok(
        method_catalogue(),
        "Depreciation methods retrieved successfully",
    ))
}

/// Stored depreciation schedule of an asset
#[utoipa::path(
    get,
    path = "/api/v1/assets/{asset_id}/depreciation",
    tag = "depreciation",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Schedule retrieved successfully", body = ApiResponse<Vec<DepreciationRecordResponse>>),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_asset_depreciation(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<DepreciationRecordResponse>>>), ApiError> {
    trace!("Entering get_asset_depreciation function");

    let cache_key = schedule_cache_key(asset_id);
    if let Some(CachedData::Schedule(records)) = state.cache.get(&cache_key).await {
        debug!("Returning cached schedule for asset {}", asset_id);
        return Ok((
            StatusCode::OK,
            Json(ApiResponse::ok(records, "Depreciation schedule retrieved successfully")),
        ));
    }

    let records: Vec<DepreciationRecordResponse> = stored_schedule(&state.db, asset_id)
        .await
        .map_err(compute_error_response)?
        .into_iter()
        .map(DepreciationRecordResponse::from)
        .collect();

    state
        .cache
        .insert(cache_key, CachedData::Schedule(records.clone()))
        .await;

    debug!("Loaded {} schedule years for asset {}", records.len(), asset_id);
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(records, "Depreciation schedule retrieved successfully")),
    ))
}

/// Rebuild and store the full depreciation schedule of an asset
#[utoipa::path(
    post,
    path = "/api/v1/assets/{asset_id}/depreciation",
    tag = "depreciation",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Schedule regenerated", body = ApiResponse<Vec<DepreciationRecordResponse>>),
        (status = 400, description = "Asset parameters are invalid", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 409, description = "Asset was modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn regenerate_asset_depreciation(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<DepreciationRecordResponse>>>), ApiError> {
    trace!("Entering regenerate_asset_depreciation function");

    let records = state
        .regenerator()
        .regenerate(&state.db, asset_id)
        .await
        .map_err(compute_error_response)?;
    state.invalidate_schedule(asset_id).await;

    info!("Regenerated schedule for asset {}", asset_id);
    let data = records
        .into_iter()
        .map(DepreciationRecordResponse::from)
        .collect();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(data, "Depreciation schedule regenerated successfully")),
    ))
}

/// Calculate and store one calendar year of an asset's schedule
#[utoipa::path(
    post,
    path = "/api/v1/assets/{asset_id}/depreciation/calculate",
    tag = "depreciation",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    request_body = AssetCalculationRequest,
    responses(
        (status = 200, description = "Depreciation calculated and stored", body = ApiResponse<DepreciationRecordResponse>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 409, description = "Asset was modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn calculate_asset_depreciation(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<AssetCalculationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DepreciationRecordResponse>>), ApiError> {
    trace!("Entering calculate_asset_depreciation function");
    request.validate().map_err(validation_error_response)?;

    let record = state
        .regenerator()
        .record_year(
            &state.db,
            asset_id,
            request.year,
            request.units_produced,
            request.total_estimated_units,
        )
        .await
        .map_err(compute_error_response)?;
    state.invalidate_schedule(asset_id).await;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            DepreciationRecordResponse::from(record),
            "Depreciation calculated successfully",
        )),
    ))
}
