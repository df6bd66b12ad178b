use crate::handlers::{
    assets::{create_asset, delete_asset, get_asset, get_asset_history, get_assets, update_asset},
    depreciation::{
        calculate_asset_depreciation, calculate_depreciation, get_asset_depreciation,
        get_depreciation_methods, regenerate_asset_depreciation,
    },
    disposals::{create_disposal, review_disposal},
    health::health_check,
    reports::get_report,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Stateless calculation
        .route("/api/v1/depreciation/calculate", post(calculate_depreciation))
        .route("/api/v1/depreciation-methods", get(get_depreciation_methods))
        // Asset CRUD routes
        .route("/api/v1/assets", post(create_asset).get(get_assets))
        .route(
            "/api/v1/assets/:asset_id",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
        .route("/api/v1/assets/:asset_id/history", get(get_asset_history))
        // Depreciation schedule routes
        .route(
            "/api/v1/assets/:asset_id/depreciation",
            get(get_asset_depreciation).post(regenerate_asset_depreciation),
        )
        .route(
            "/api/v1/assets/:asset_id/depreciation/calculate",
            post(calculate_asset_depreciation),
        )
        // Disposal workflow
        .route(
            "/api/v1/assets/:asset_id/disposal",
            post(create_disposal).put(review_disposal),
        )
        // Reports
        .route("/api/v1/reports", get(get_report))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // The Prometheus recorder is process global, so tests run without it
    #[cfg(not(test))]
    let router = {
        let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();
        router
            .route("/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer)
    };

    router
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
