use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Only request-parsing failures terminate a webhook request; channel
/// delivery failures are reported inside the 200 response body and never
/// appear here. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request's Content-Type is neither JSON nor plain text.
    #[error("Unsupported Content-Type")]
    UnsupportedMediaType,

    /// The request body could not be parsed as JSON.
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),

    /// A `text/plain` body was not valid UTF-8.
    #[error("Request body is not valid UTF-8")]
    InvalidUtf8,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            AppError::InvalidJson(_) => "INVALID_JSON",
            AppError::InvalidUtf8 => "INVALID_UTF8",
        };

        let body = json!({
            "error": self.to_string(),
            "code": code,
        });

        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_media_type_display_matches_wire_format() {
        assert_eq!(
            AppError::UnsupportedMediaType.to_string(),
            "Unsupported Content-Type"
        );
    }

    #[test]
    fn invalid_json_embeds_parser_message() {
        let err = AppError::InvalidJson("expected value at line 1 column 1".to_string());
        assert!(err.to_string().contains("expected value"));
    }
}
