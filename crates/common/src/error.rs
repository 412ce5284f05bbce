//! Common error types and handling for Handasa
//!
//! Every failure is converted at the HTTP boundary into the JSON envelope
//! `{ "success": false, "message": "..." }` that the frontend contract
//! expects. Client-facing messages are Arabic; logs stay in English.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Handasa application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 401 — missing/expired/malformed credentials
    #[error("{0}")]
    Authentication(String),

    /// 403 — valid credentials, wrong role
    #[error("{0}")]
    Authorization(String),

    /// 400 — missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// 400 — attachment extension outside the field's allow-list
    #[error("{0}")]
    UnsupportedType(String),

    /// 400 — attachment above the 50MB ceiling
    #[error("{0}")]
    TooLarge(String),

    /// 404 — no record for the given identifier
    #[error("{0}")]
    NotFound(String),

    /// 404 — identifier is not a well-formed UUID
    #[error("{0}")]
    InvalidId(String),

    /// 500 — a remote storage upload failed
    #[error("{0}")]
    UploadFailed(String),

    /// 500 — the database write after successful uploads failed
    #[error("{0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Authorization(_) => StatusCode::FORBIDDEN,
            Error::Validation(_) | Error::UnsupportedType(_) | Error::TooLarge(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) | Error::InvalidId(_) => StatusCode::NOT_FOUND,
            Error::UploadFailed(_)
            | Error::Persistence(_)
            | Error::Unexpected(_)
            | Error::Database(_)
            | Error::Serialization(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the client-facing message is the error's own text.
    ///
    /// Infrastructure errors (sqlx, serde, anyhow) carry internals that
    /// must not leak to the client; they get a generic message instead.
    fn message_is_public(&self) -> bool {
        !matches!(
            self,
            Error::Unexpected(_) | Error::Database(_) | Error::Serialization(_) | Error::Internal(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors with full context before masking them
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal server error");
        }

        let message = if self.message_is_public() {
            self.to_string()
        } else {
            "❌ حدث خطأ في الخادم".to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            Error::Authentication("test".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::Authorization("test".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::Validation("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::UnsupportedType("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::TooLarge("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::InvalidId("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_upload_errors_are_internal() {
        assert_eq!(
            Error::UploadFailed("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Persistence("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages_pass_through() {
        let err = Error::Validation("❌ حالة غير صالحة".to_string());
        assert!(err.message_is_public());
        assert_eq!(err.to_string(), "❌ حالة غير صالحة");
    }

    #[test]
    fn test_infrastructure_messages_are_masked() {
        let err = Error::Internal("pool exhausted".to_string());
        assert!(!err.message_is_public());
    }
}
