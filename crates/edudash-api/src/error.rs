//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use edudash_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Status code and error code for an error kind.
fn classify(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Storage => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = classify(self.kind);

        let message = if self.kind.is_server_side() {
            tracing::error!(
                kind = %self.kind,
                error = %self.message,
                source = ?std::error::Error::source(&self),
                "Internal server error"
            );
            "Internal Error".to_string()
        } else {
            self.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_side_kinds_hide_details() {
        let response = AppError::database("connection reset by peer").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_kinds_map_to_4xx() {
        assert_eq!(classify(ErrorKind::Validation).0, StatusCode::BAD_REQUEST);
        assert_eq!(classify(ErrorKind::Unauthorized).0, StatusCode::UNAUTHORIZED);
        assert_eq!(classify(ErrorKind::Forbidden).0, StatusCode::FORBIDDEN);
        assert_eq!(classify(ErrorKind::NotFound).0, StatusCode::NOT_FOUND);
        assert_eq!(classify(ErrorKind::Conflict).0, StatusCode::CONFLICT);
    }
}
