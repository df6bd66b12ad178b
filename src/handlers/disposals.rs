use crate::handlers::assets::AssetResponse;
use crate::schemas::{
    ApiError, ApiResponse, AppState, ErrorResponse, compute_error_response,
    database_error_response, error_response, validation_error_response,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use compute::regenerate::find_asset;
use model::entities::asset::{self, AssetStatus};
use model::entities::disposal::{self, DisposalStatus};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for asking to dispose of an asset
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateDisposalRequest {
    pub disposal_date: NaiveDate,
    /// Expected proceeds from sale or scrapping
    pub disposal_value: Decimal,
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

/// Request body for approving or rejecting the pending disposal of an asset
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReviewDisposalRequest {
    /// APPROVED or REJECTED
    pub status: String,
}

/// Disposal response model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisposalResponse {
    pub id: i32,
    pub asset_id: i32,
    pub disposal_date: NaiveDate,
    pub disposal_value: Decimal,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<disposal::Model> for DisposalResponse {
    fn from(model: disposal::Model) -> Self {
        Self {
            id: model.id,
            asset_id: model.asset_id,
            disposal_date: model.disposal_date,
            disposal_value: model.disposal_value,
            reason: model.reason,
            status: model.status.to_value(),
            created_at: model.created_at,
        }
    }
}

/// Outcome of a disposal review: the decided request and the asset after it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DisposalReviewResponse {
    pub disposal: DisposalResponse,
    pub asset: AssetResponse,
}

fn conflict(message: String) -> ApiError {
    warn!("{}", message);
    error_response(StatusCode::CONFLICT, "CONFLICT", message)
}

/// Request the disposal of an asset. The request starts out PENDING.
#[utoipa::path(
    post,
    path = "/api/v1/assets/{asset_id}/disposal",
    tag = "disposals",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    request_body = CreateDisposalRequest,
    responses(
        (status = 201, description = "Disposal requested", body = ApiResponse<DisposalResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 409, description = "Asset already disposed or a request is pending", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_disposal(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateDisposalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DisposalResponse>>), ApiError> {
    trace!("Entering create_disposal function");
    request.validate().map_err(validation_error_response)?;
    if request.disposal_value < Decimal::ZERO {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_ARGUMENT",
            format!(
                "disposal value must not be negative, got {}",
                request.disposal_value
            ),
        ));
    }

    let asset = find_asset(&state.db, asset_id)
        .await
        .map_err(compute_error_response)?;
    if asset.status == AssetStatus::Disposed {
        return Err(conflict(format!("Asset {} is already disposed", asset_id)));
    }

    let pending = disposal::Entity::find()
        .filter(disposal::Column::AssetId.eq(asset_id))
        .filter(disposal::Column::Status.eq(DisposalStatus::Pending))
        .one(&state.db)
        .await
        .map_err(|e| database_error_response("Failed to look up pending disposals", e))?;
    if let Some(pending) = pending {
        return Err(conflict(format!(
            "Asset {} already has pending disposal {}",
            asset_id, pending.id
        )));
    }

    let created = disposal::ActiveModel {
        asset_id: Set(asset_id),
        disposal_date: Set(request.disposal_date),
        disposal_value: Set(request.disposal_value),
        reason: Set(request.reason.clone()),
        status: Set(DisposalStatus::Pending),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| database_error_response("Failed to create disposal", e))?;

    info!("Disposal {} requested for asset {}", created.id, asset_id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            DisposalResponse::from(created),
            "Disposal requested successfully",
        )),
    ))
}

/// Approve or reject the pending disposal of an asset.
///
/// Approval marks the asset DISPOSED, rejection returns it to ACTIVE.
#[utoipa::path(
    put,
    path = "/api/v1/assets/{asset_id}/disposal",
    tag = "disposals",
    params(("asset_id" = i32, Path, description = "Asset ID")),
    request_body = ReviewDisposalRequest,
    responses(
        (status = 200, description = "Disposal reviewed", body = ApiResponse<DisposalReviewResponse>),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 404, description = "No pending disposal for this asset", body = ErrorResponse),
        (status = 409, description = "Asset was modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn review_disposal(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<ReviewDisposalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DisposalReviewResponse>>), ApiError> {
    trace!("Entering review_disposal function");

    let (decision, asset_status) = match request.status.as_str() {
        "APPROVED" => (DisposalStatus::Approved, AssetStatus::Disposed),
        "REJECTED" => (DisposalStatus::Rejected, AssetStatus::Active),
        other => {
            warn!("Invalid disposal decision: {}", other);
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
                format!("Invalid disposal status: {}", other),
            ));
        }
    };

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| database_error_response("Failed to start transaction", e))?;

    let asset = find_asset(&txn, asset_id)
        .await
        .map_err(compute_error_response)?;
    let pending = disposal::Entity::find()
        .filter(disposal::Column::AssetId.eq(asset_id))
        .filter(disposal::Column::Status.eq(DisposalStatus::Pending))
        .one(&txn)
        .await
        .map_err(|e| database_error_response("Failed to look up pending disposals", e))?
        .ok_or_else(|| {
            warn!("No pending disposal for asset {}", asset_id);
            error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No pending disposal request found for asset {}", asset_id),
            )
        })?;
    debug!("Reviewing disposal {} of asset {}", pending.id, asset_id);

    let mut decided: disposal::ActiveModel = pending.into();
    decided.status = Set(decision);
    let decided = decided
        .update(&txn)
        .await
        .map_err(|e| database_error_response("Failed to update disposal", e))?;

    let version = asset.version;
    let mut retired: asset::ActiveModel = asset.into();
    retired.status = Set(asset_status);
    retired.version = Set(version + 1);
    retired.updated_at = Set(Utc::now());
    let updated = asset::Entity::update(retired)
        .filter(asset::Column::Version.eq(version))
        .exec(&txn)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                conflict(format!("Asset {} was modified concurrently", asset_id))
            }
            other => database_error_response("Failed to update asset status", other),
        })?;

    txn.commit()
        .await
        .map_err(|e| database_error_response("Failed to commit disposal review", e))?;

    info!(
        "Disposal {} of asset {} {}",
        decided.id,
        asset_id,
        decided.status.to_value()
    );
    let review = DisposalReviewResponse {
        disposal: DisposalResponse::from(decided),
        asset: AssetResponse::from(updated),
    };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(review, "Disposal reviewed successfully")),
    ))
}
