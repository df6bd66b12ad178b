use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::asset;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::{instrument, warn};
use crate::schemas::{AppState, ErrorResponse, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    // Test database connection
    let (db_status, tracked_assets) = match state.db.ping().await {
        Ok(_) => {
            let count = asset::Entity::find().count(&state.db).await;
            if let Err(e) = &count {
                warn!("Health check could not count assets: {}", e);
            }
            ("connected".to_string(), count.ok())
        }
        Err(_) => ("disconnected".to_string(), None),
    };

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
        tracked_assets,
    };

    Ok(Json(response))
}
