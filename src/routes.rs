use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{classify, forecast, health, AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/v1/labels", get(classify::list_labels))
        .route("/api/v1/about", get(classify::about))
        .route("/api/v1/classify", post(classify::classify))
        .route("/api/v1/appliances", get(forecast::list_appliances))
        .route("/api/v1/forecast", post(forecast::run_forecast))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
