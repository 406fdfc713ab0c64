use axum::{
    extract::State,
    response::Json,
};

use crate::error::Result;
use crate::handlers::AppState;
use crate::models::{ApplianceListResponse, ForecastRequest, ForecastResponse};

pub async fn run_forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>> {
    let response = state.forecast.run(request)?;
    Ok(Json(response))
}

pub async fn list_appliances(State(state): State<AppState>) -> Json<ApplianceListResponse> {
    let appliances = state.forecast.appliances();
    let total = appliances.len();
    Json(ApplianceListResponse { appliances, total })
}
