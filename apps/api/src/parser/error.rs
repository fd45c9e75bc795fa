use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Machine-readable error codes surfaced to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    FileType,
    Extraction,
    Parsing,
    InvalidResponseFormat,
    #[serde(rename = "JSON_DECODE_ERROR")]
    JsonDecode,
    RateLimitExceeded,
    CompletionServiceError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FileType => "FILE_TYPE",
            ErrorCode::Extraction => "EXTRACTION",
            ErrorCode::Parsing => "PARSING",
            ErrorCode::InvalidResponseFormat => "INVALID_RESPONSE_FORMAT",
            ErrorCode::JsonDecode => "JSON_DECODE_ERROR",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::CompletionServiceError => "COMPLETION_SERVICE_ERROR",
        }
    }
}

/// Failure of a single pipeline run. Each variant is scoped to one upload.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("File is too large ({size} bytes). Maximum size: 10MB")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported file format. Accepted formats: PDF, DOCX")]
    UnsupportedFormat { detected: Option<String> },

    #[error("Could not extract text from the {format} document")]
    Extraction { format: &'static str, cause: String },

    #[error("Completion reply is not a JSON object")]
    InvalidResponseFormat { preview: String },

    #[error("Completion reply could not be decoded: {0}")]
    JsonDecode(#[from] serde_json::Error),

    #[error("Completion service rate limit still hit after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    #[error("Completion service error: {0}")]
    CompletionService(String),

    #[error("An error occurred while analysing the résumé: {0}")]
    Parsing(#[source] anyhow::Error),
}

impl ParsingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParsingError::FileTooLarge { .. } | ParsingError::UnsupportedFormat { .. } => {
                ErrorCode::FileType
            }
            ParsingError::Extraction { .. } => ErrorCode::Extraction,
            ParsingError::InvalidResponseFormat { .. } => ErrorCode::InvalidResponseFormat,
            ParsingError::JsonDecode(_) => ErrorCode::JsonDecode,
            ParsingError::RateLimitExceeded { .. } => ErrorCode::RateLimitExceeded,
            ParsingError::CompletionService(_) => ErrorCode::CompletionServiceError,
            ParsingError::Parsing(_) => ErrorCode::Parsing,
        }
    }

    /// Diagnostic payload attached to the error response, if any.
    pub fn details(&self) -> Option<Value> {
        match self {
            ParsingError::FileTooLarge { size, max } => Some(json!({ "size": size, "max": max })),
            ParsingError::UnsupportedFormat { detected } => {
                Some(json!({ "detectedType": detected.as_deref().unwrap_or("") }))
            }
            ParsingError::Extraction { format, cause } => {
                Some(json!({ "format": format, "originalError": cause }))
            }
            ParsingError::InvalidResponseFormat { preview } => {
                Some(json!({ "responsePreview": preview }))
            }
            ParsingError::JsonDecode(e) => Some(json!({ "originalError": e.to_string() })),
            ParsingError::RateLimitExceeded { attempts } => Some(json!({ "attempts": attempts })),
            ParsingError::CompletionService(_) => None,
            ParsingError::Parsing(e) => Some(json!({ "originalError": format!("{e:#}") })),
        }
    }

    pub fn parsing(err: impl Into<anyhow::Error>) -> Self {
        ParsingError::Parsing(err.into())
    }
}

impl From<LlmError> for ParsingError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::RateLimited { attempts } => ParsingError::RateLimitExceeded { attempts },
            other => ParsingError::CompletionService(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_errors_share_file_type_code() {
        let too_large = ParsingError::FileTooLarge { size: 11, max: 10 };
        let unsupported = ParsingError::UnsupportedFormat { detected: None };
        assert_eq!(too_large.code(), ErrorCode::FileType);
        assert_eq!(unsupported.code(), ErrorCode::FileType);
        assert_eq!(too_large.code().as_str(), "FILE_TYPE");
    }

    #[test]
    fn test_error_code_serializes_like_as_str() {
        for code in [
            ErrorCode::FileType,
            ErrorCode::JsonDecode,
            ErrorCode::RateLimitExceeded,
            ErrorCode::CompletionServiceError,
        ] {
            assert_eq!(serde_json::to_value(code).unwrap(), json!(code.as_str()));
        }
    }

    #[test]
    fn test_rate_limited_llm_error_maps_to_rate_limit_exceeded() {
        let err: ParsingError = LlmError::RateLimited { attempts: 3 }.into();
        assert!(matches!(err, ParsingError::RateLimitExceeded { attempts: 3 }));
    }

    #[test]
    fn test_api_llm_error_keeps_original_message() {
        let err: ParsingError = LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::CompletionServiceError);
        assert!(err.to_string().contains("invalid x-api-key"));
    }

    #[test]
    fn test_provider_envelope_decode_failure_is_a_service_error() {
        let cause = serde_json::from_str::<serde_json::Value>("{\"content\":").unwrap_err();
        let err: ParsingError = LlmError::Parse(cause).into();
        assert_eq!(err.code(), ErrorCode::CompletionServiceError);
        assert!(!matches!(err, ParsingError::JsonDecode(_)));
    }

    #[test]
    fn test_parsing_wraps_original_error() {
        let err = ParsingError::parsing(anyhow::anyhow!("boom"));
        assert_eq!(err.code(), ErrorCode::Parsing);
        assert_eq!(err.details().unwrap()["originalError"], "boom");
    }
}
