use crate::handlers::{
    calendar::get_calendar,
    categories::{get_categories, get_category_taxonomy, get_taxonomy},
    climate::get_climate,
    details::get_details,
    health::health_check,
    investments::{build_investment_request, predict_investment},
    monthly::get_monthly,
    yearly::get_yearly,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Analysis pages
        .route("/api/v1/yearly", get(get_yearly))
        .route("/api/v1/climate", get(get_climate))
        .route("/api/v1/monthly/:month", get(get_monthly))
        .route("/api/v1/categories", get(get_categories))
        // Details page
        .route("/api/v1/taxonomy", get(get_taxonomy))
        .route("/api/v1/taxonomy/:category", get(get_category_taxonomy))
        .route("/api/v1/details", post(get_details))
        // Budget planning
        .route("/api/v1/investments/request", post(build_investment_request))
        .route("/api/v1/investments/predict", post(predict_investment))
        .route("/api/v1/calendar/:year/:month", get(get_calendar))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
