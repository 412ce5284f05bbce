//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    InvalidUserId,
    /// Valid token, but the role claim does not grant admin access
    NotAdmin,
}

impl AuthError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingAuthorization | AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "غير مصرح - الرجاء تسجيل الدخول",
            ),
            AuthError::InvalidToken | AuthError::InvalidUserId => {
                (StatusCode::UNAUTHORIZED, "توكن غير صالح أو منتهي")
            }
            AuthError::NotAdmin => (
                StatusCode::FORBIDDEN,
                "🚫 ليس لديك صلاحية الوصول كأدمن.",
            ),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
