use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Inference error: {0}")]
    Inference(#[from] ort::Error),

    #[error("Invalid input: {0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Artifact(ref msg) => {
                tracing::error!("Artifact error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Model artifact error")
            }
            AppError::Inference(ref e) => {
                tracing::error!("Inference error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Inference failed")
            }
            AppError::Validation(ref msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
