use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::grading::pipeline::{GradingError, MISSING_INPUT_WARNING};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Incomplete submission; shown to the user as a warning.
    #[error("Input warning: {0}")]
    InputWarning(String),

    /// Request body is not JSON or does not match the expected shape.
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<GradingError> for AppError {
    fn from(err: GradingError) -> Self {
        match err {
            GradingError::Input(e) => AppError::InputWarning(e.to_string()),
            e @ GradingError::Provider(_) => AppError::Provider(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InputWarning(detail) => {
                tracing::warn!("Input warning: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    "INPUT_WARNING",
                    MISSING_INPUT_WARNING.to_string(),
                )
            }
            AppError::InvalidBody { status, message } => {
                tracing::warn!("Rejected request body: {message}");
                (*status, "INVALID_BODY", message.clone())
            }
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
