use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the inbound HTTP layer itself.
///
/// Backend outcomes are not `AppError`s: a failed ingestion or question is a
/// normal page state rendered as a failure notice.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid form submission: {0}")]
    InvalidForm(#[from] MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No page at {path}"),
            ),
            AppError::Validation(msg) => {
                tracing::warn!("Rejected form submission: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::InvalidForm(e) => {
                let status = e.status();
                if status == StatusCode::PAYLOAD_TOO_LARGE {
                    tracing::warn!("Upload rejected: {e}");
                    (
                        status,
                        "PAYLOAD_TOO_LARGE",
                        "The uploaded file is too large".to_string(),
                    )
                } else {
                    tracing::warn!("Malformed form submission: {e}");
                    (status, "INVALID_FORM", e.body_text())
                }
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
