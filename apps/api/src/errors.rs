use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Taxonomy:
/// - `Provider`: the generation call itself failed (network, auth, quota).
///   Never retried by the structured-output layer.
/// - `Extraction`: generated text could not be coerced to the expected JSON
///   shape even after the strict retry. Carries a short preview of the raw
///   output for diagnosis.
/// - `Validation`: parsed JSON violates shape constraints, or the request
///   payload itself is malformed.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("AI provider error: {0}")]
    Provider(String),

    #[error("Failed to extract structured output from model response")]
    Extraction { preview: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI generation failed".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Extraction { preview } => {
                tracing::error!("Extraction failure, raw output preview: {preview}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse AI response".to_string(),
                    Some(preview.clone()),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        // Wire shape consumed by the frontend: {"error": ..., "details": ...}.
        // Never includes credentials or stack traces.
        let body = match details {
            Some(d) => Json(json!({ "error": error, "details": d })),
            None => Json(json!({ "error": error })),
        };

        (status, body).into_response()
    }
}
