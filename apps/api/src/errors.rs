use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The three AI failure categories are deliberately distinct: a missing
/// credential, a provider failure and unparsable model output need
/// different operator responses (configure, wait, fix the prompt).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("AI credentials are not configured")]
    Config,

    #[error("AI provider error: {0}")]
    Provider(String),

    #[error("The AI response could not be processed")]
    MalformedOutput { raw: String },
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingApiKey => AppError::Config,
            other => AppError::Provider(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Config => {
                tracing::error!("AI pipeline invoked without ANTHROPIC_API_KEY configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    "AI credentials are not configured".to_string(),
                )
            }
            AppError::Provider(msg) => {
                tracing::error!("AI provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "The AI provider request failed. Please try again.".to_string(),
                )
            }
            AppError::MalformedOutput { raw } => {
                // The full raw output is logged where the parse failed.
                tracing::debug!("Malformed model output ({} bytes)", raw.len());
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_MODEL_OUTPUT",
                    "The AI response could not be processed. Please try again.".to_string(),
                )
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
