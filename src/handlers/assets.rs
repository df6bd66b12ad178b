use crate::handlers::depreciation::DepreciationRecordResponse;
use crate::handlers::disposals::DisposalResponse;
use crate::schemas::{
    ApiError, ApiResponse, AppState, ErrorResponse, compute_error_response,
    database_error_response, error_response, validation_error_response,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use compute::depreciation::{AssetFinancials, parse_method};
use compute::regenerate::{find_asset, stored_schedule};
use model::entities::asset::{self, AssetStatus};
use model::entities::disposal;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for registering a new asset
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateAssetRequest {
    /// Asset name
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Category such as "Equipment", "Vehicle" or "Building"
    #[validate(length(min = 1, max = 100))]
    pub asset_type: String,
    /// Acquisition cost
    pub cost: Decimal,
    /// Acquisition date (YYYY-MM-DD)
    pub purchase_date: NaiveDate,
    #[validate(length(max = 200))]
    pub location: String,
    #[validate(length(max = 100))]
    pub condition: String,
    /// STRAIGHT_LINE, DECLINING_BALANCE or UNITS_OF_PRODUCTION
    pub depreciation_method: String,
    /// Useful life in years
    #[validate(range(min = 1, max = 1000))]
    pub useful_life: i32,
    /// Expected value at the end of the useful life
    pub salvage_value: Decimal,
    /// Lifetime production estimate for units-of-production assets
    pub total_estimated_units: Option<Decimal>,
}

/// Request body for updating an asset. Omitted fields keep their value.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate, Default)]
pub struct UpdateAssetRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// `null` clears the description
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, max = 100))]
    pub asset_type: Option<String>,
    pub cost: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub condition: Option<String>,
    /// ACTIVE or INACTIVE; assets become DISPOSED only through an approved disposal
    pub status: Option<String>,
    pub depreciation_method: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub useful_life: Option<i32>,
    pub salvage_value: Option<Decimal>,
    /// `null` clears the estimate
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub total_estimated_units: Option<Option<Decimal>>,
    /// Version the client last read; the update is refused if the asset moved on
    pub version: Option<i32>,
}

/// Tells an explicit `null` (`Some(None)`) apart from an omitted field (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Asset response model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub asset_type: String,
    pub cost: Decimal,
    pub purchase_date: NaiveDate,
    pub location: String,
    pub condition: String,
    pub status: String,
    pub depreciation_method: String,
    pub useful_life: i32,
    pub salvage_value: Decimal,
    pub total_estimated_units: Option<Decimal>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<asset::Model> for AssetResponse {
    fn from(model: asset::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            asset_type: model.asset_type,
            cost: model.cost,
            purchase_date: model.purchase_date,
            location: model.location,
            condition: model.condition,
            status: model.status.to_value(),
            depreciation_method: model.depreciation_method.to_value(),
            useful_life: model.useful_life,
            salvage_value: model.salvage_value,
            total_estimated_units: model.total_estimated_units,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Everything recorded about one asset
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetHistoryResponse {
    pub asset: AssetResponse,
    /// Stored schedule, ascending by year
    pub depreciation: Vec<DepreciationRecordResponse>,
    /// Disposal requests, newest first
    pub disposals: Vec<DisposalResponse>,
}

/// Query parameters for listing assets
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct AssetListQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
    /// Filter by status (ACTIVE, INACTIVE or DISPOSED)
    pub status: Option<String>,
}

fn parse_status(value: &str) -> Result<AssetStatus, ApiError> {
    AssetStatus::try_from_value(&value.to_string()).map_err(|_| {
        warn!("Invalid asset status: {}", value);
        error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_ARGUMENT",
            format!("Invalid asset status: {}", value),
        )
    })
}

/// Statuses a client may set directly.
fn parse_editable_status(value: &str) -> Result<AssetStatus, ApiError> {
    match parse_status(value)? {
        AssetStatus::Disposed => {
            warn!("Refusing to mark an asset DISPOSED outside the disposal workflow");
            Err(error_response(
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
                "Assets are marked DISPOSED by approving a disposal",
            ))
        }
        status => Ok(status),
    }
}

/// Register a new asset and build its depreciation schedule
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    tag = "assets",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Asset created successfully", body = ApiResponse<AssetResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_asset(
    State(state): State<AppState>,
    Json(request): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AssetResponse>>), ApiError> {
    trace!("Entering create_asset function");
    debug!(
        "Creating asset '{}' with cost {} and method {}",
        request.name, request.cost, request.depreciation_method
    );

    request.validate().map_err(validation_error_response)?;
    let method = parse_method(&request.depreciation_method).map_err(compute_error_response)?;
    AssetFinancials {
        cost: request.cost,
        salvage_value: request.salvage_value,
        useful_life: request.useful_life,
        method,
        purchase_year: request.purchase_date.year(),
        total_estimated_units: request.total_estimated_units,
    }
    .validate()
    .map_err(compute_error_response)?;

    let now = Utc::now();
    let new_asset = asset::ActiveModel {
        name: Set(request.name.clone()),
        description: Set(request.description.clone()),
        asset_type: Set(request.asset_type.clone()),
        cost: Set(request.cost),
        purchase_date: Set(request.purchase_date),
        location: Set(request.location.clone()),
        condition: Set(request.condition.clone()),
        status: Set(AssetStatus::Active),
        depreciation_method: Set(method),
        useful_life: Set(request.useful_life),
        salvage_value: Set(request.salvage_value),
        total_estimated_units: Set(request.total_estimated_units),
        version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| database_error_response("Failed to start transaction", e))?;

    let created = new_asset
        .insert(&txn)
        .await
        .map_err(|e| database_error_response("Failed to create asset", e))?;
    debug!("Inserted asset with ID {}", created.id);

    let schedule = state
        .regenerator()
        .regenerate_asset(&txn, &created)
        .await
        .map_err(compute_error_response)?;
    let stored = find_asset(&txn, created.id)
        .await
        .map_err(compute_error_response)?;

    txn.commit()
        .await
        .map_err(|e| database_error_response("Failed to commit asset", e))?;

    info!(
        "Asset created successfully with ID: {}, name: {}, schedule years: {}",
        stored.id,
        stored.name,
        schedule.len()
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            AssetResponse::from(stored),
            "Asset created successfully",
        )),
    ))
}

/// List assets
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    tag = "assets",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Assets retrieved successfully", body = ApiResponse<Vec<AssetResponse>>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_assets(
    Valid(Query(query)): Valid<Query<AssetListQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<AssetResponse>>>), ApiError> {
    trace!("Entering get_assets function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);
    debug!("Fetching assets - page: {}, limit: {}", page, limit);

    let mut query_builder = asset::Entity::find();
    if let Some(status) = &query.status {
        query_builder = query_builder.filter(asset::Column::Status.eq(parse_status(status)?));
    }

    let assets = query_builder
        .order_by_asc(asset::Column::Id)
        .paginate(&state.db, limit)
        .fetch_page(page - 1)
        .await
        .map_err(|e| database_error_response("Failed to retrieve assets", e))?;

    info!("Successfully retrieved {} assets", assets.len());
    let data = assets.into_iter().map(AssetResponse::from).collect();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(data, "Assets retrieved successfully")),
    ))
}

/// Get a specific asset by ID
#[utoipa::path(
    get,
    path = "/api/v1/assets/{asset_id}",
    tag = "assets",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset retrieved successfully", body = ApiResponse<AssetResponse>),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_asset(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<AssetResponse>>), ApiError> {
    trace!("Entering get_asset function");
    let asset = find_asset(&state.db, asset_id)
        .await
        .map_err(compute_error_response)?;

    debug!("Found asset {} ({})", asset.id, asset.name);
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            AssetResponse::from(asset),
            "Asset retrieved successfully",
        )),
    ))
}

/// Update an asset. The depreciation schedule is rebuilt when financial fields change.
#[utoipa::path(
    put,
    path = "/api/v1/assets/{asset_id}",
    tag = "assets",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAssetRequest,
    responses(
        (status = 200, description = "Asset updated successfully", body = ApiResponse<AssetResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 409, description = "Asset was modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_asset(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAssetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AssetResponse>>), ApiError> {
    trace!("Entering update_asset function");
    request.validate().map_err(validation_error_response)?;

    let current = find_asset(&state.db, asset_id)
        .await
        .map_err(compute_error_response)?;

    if let Some(expected) = request.version {
        if expected != current.version {
            warn!(
                "Stale update for asset {}: client has version {}, stored is {}",
                asset_id, expected, current.version
            );
            return Err(error_response(
                StatusCode::CONFLICT,
                "CONFLICT",
                format!(
                    "Asset {} is at version {}, not {}",
                    asset_id, current.version, expected
                ),
            ));
        }
    }

    let method = match &request.depreciation_method {
        Some(value) => parse_method(value).map_err(compute_error_response)?,
        None => current.depreciation_method,
    };
    let status = match &request.status {
        Some(_) if current.status == AssetStatus::Disposed => {
            warn!("Refusing to change the status of disposed asset {}", asset_id);
            return Err(error_response(
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Asset {} is disposed and its status can no longer change", asset_id),
            ));
        }
        Some(value) => parse_editable_status(value)?,
        None => current.status,
    };
    let purchase_date = request.purchase_date.unwrap_or(current.purchase_date);

    let financials = AssetFinancials {
        cost: request.cost.unwrap_or(current.cost),
        salvage_value: request.salvage_value.unwrap_or(current.salvage_value),
        useful_life: request.useful_life.unwrap_or(current.useful_life),
        method,
        purchase_year: purchase_date.year(),
        total_estimated_units: request
            .total_estimated_units
            .unwrap_or(current.total_estimated_units),
    };
    financials.validate().map_err(compute_error_response)?;
    let financials_changed = financials != AssetFinancials::from_asset(&current);

    let mut active: asset::ActiveModel = current.clone().into();
    if let Some(name) = &request.name {
        active.name = Set(name.clone());
    }
    if let Some(description) = &request.description {
        active.description = Set(description.clone());
    }
    if let Some(asset_type) = &request.asset_type {
        active.asset_type = Set(asset_type.clone());
    }
    if let Some(location) = &request.location {
        active.location = Set(location.clone());
    }
    if let Some(condition) = &request.condition {
        active.condition = Set(condition.clone());
    }
    active.status = Set(status);
    active.purchase_date = Set(purchase_date);
    active.cost = Set(financials.cost);
    active.salvage_value = Set(financials.salvage_value);
    active.useful_life = Set(financials.useful_life);
    active.depreciation_method = Set(financials.method);
    active.total_estimated_units = Set(financials.total_estimated_units);
    active.version = Set(current.version + 1);
    active.updated_at = Set(Utc::now());

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| database_error_response("Failed to start transaction", e))?;

    let updated = asset::Entity::update(active)
        .filter(asset::Column::Version.eq(current.version))
        .exec(&txn)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                warn!("Asset {} changed while it was being updated", asset_id);
                error_response(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Asset {} was modified concurrently", asset_id),
                )
            }
            other => database_error_response("Failed to update asset", other),
        })?;

    if financials_changed {
        debug!("Financial parameters of asset {} changed, regenerating", asset_id);
        state
            .regenerator()
            .regenerate_asset(&txn, &updated)
            .await
            .map_err(compute_error_response)?;
    }
    let stored = find_asset(&txn, asset_id)
        .await
        .map_err(compute_error_response)?;

    txn.commit()
        .await
        .map_err(|e| database_error_response("Failed to commit asset update", e))?;
    state.invalidate_schedule(asset_id).await;

    info!("Asset {} updated to version {}", asset_id, stored.version);
    let message = if financials_changed {
        "Asset updated and depreciation schedule regenerated"
    } else {
        "Asset updated successfully"
    };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(AssetResponse::from(stored), message)),
    ))
}

/// Delete an asset together with its schedule, usage and disposals
#[utoipa::path(
    delete,
    path = "/api/v1/assets/{asset_id}",
    tag = "assets",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_asset(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), ApiError> {
    trace!("Entering delete_asset function for asset_id: {}", asset_id);

    let delete_result = asset::Entity::delete_by_id(asset_id)
        .exec(&state.db)
        .await
        .map_err(|e| database_error_response("Failed to delete asset", e))?;
    debug!(
        "Delete operation completed. Rows affected: {}",
        delete_result.rows_affected
    );

    if delete_result.rows_affected == 0 {
        warn!("Asset with ID {} not found for deletion", asset_id);
        return Err(error_response(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("asset {} not found", asset_id),
        ));
    }
    state.invalidate_schedule(asset_id).await;

    info!("Asset with ID {} deleted successfully", asset_id);
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            format!("Asset {} deleted", asset_id),
            "Asset deleted successfully",
        )),
    ))
}

/// Asset details with its stored schedule and disposal requests
#[utoipa::path(
    get,
    path = "/api/v1/assets/{asset_id}/history",
    tag = "assets",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset history retrieved successfully", body = ApiResponse<AssetHistoryResponse>),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_asset_history(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<AssetHistoryResponse>>), ApiError> {
    trace!("Entering get_asset_history function");

    let asset = find_asset(&state.db, asset_id)
        .await
        .map_err(compute_error_response)?;
    let records = stored_schedule(&state.db, asset_id)
        .await
        .map_err(compute_error_response)?;
    let disposals = disposal::Entity::find()
        .filter(disposal::Column::AssetId.eq(asset_id))
        .order_by_desc(disposal::Column::CreatedAt)
        .order_by_desc(disposal::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| database_error_response("Failed to retrieve disposals", e))?;

    debug!(
        "Asset {} has {} schedule years and {} disposals",
        asset_id,
        records.len(),
        disposals.len()
    );
    let history = AssetHistoryResponse {
        asset: AssetResponse::from(asset),
        depreciation: records
            .into_iter()
            .map(DepreciationRecordResponse::from)
            .collect(),
        disposals: disposals.into_iter().map(DisposalResponse::from).collect(),
    };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(history, "Asset history retrieved successfully")),
    ))
}
