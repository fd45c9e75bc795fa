use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::parser::error::ParsingError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

fn parsing_status(err: &ParsingError) -> StatusCode {
    match err {
        ParsingError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ParsingError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ParsingError::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ParsingError::RateLimitExceeded { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ParsingError::InvalidResponseFormat { .. }
        | ParsingError::JsonDecode(_)
        | ParsingError::CompletionService(_) => StatusCode::BAD_GATEWAY,
        ParsingError::Parsing(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details): (StatusCode, &str, String, Option<Value>) =
            match &self {
                AppError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                AppError::Parsing(e) => {
                    let status = parsing_status(e);
                    if status.is_server_error() {
                        tracing::error!(code = e.code().as_str(), "Résumé parsing failed: {e}");
                    } else {
                        tracing::warn!(code = e.code().as_str(), "Résumé rejected: {e}");
                    }
                    (status, e.code().as_str(), e.to_string(), e.details())
                }
            };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
