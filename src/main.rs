use assistant_api::artifacts::{onnx, LabelSet, OnnxImageClassifier, OnnxPowerRegressor};
use assistant_api::handlers::AppState;
use assistant_api::routes::create_router;
use assistant_api::services::{ClassifyService, ForecastService};
use assistant_api::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Load model artifacts
    onnx::init_runtime()?;

    let labels = Arc::new(LabelSet::from_file(&config.artifacts.classifier_labels_path)?);
    let classifier = Arc::new(OnnxImageClassifier::load(
        &config.artifacts.classifier_model_path,
        config.artifacts.onnx_threads,
    )?);
    info!(labels = labels.len(), "Image classifier loaded");

    let appliances = Arc::new(LabelSet::from_file(&config.artifacts.appliance_labels_path)?);
    let regressor = Arc::new(OnnxPowerRegressor::load(
        &config.artifacts.power_model_path,
        config.artifacts.onnx_threads,
    )?);
    info!(appliances = appliances.len(), "Power regression model loaded");

    // Initialize services
    let state = AppState {
        classify: ClassifyService::new(classifier, labels),
        forecast: ForecastService::new(regressor, appliances, config.pricing.clone()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
