//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;
use crate::principal::Principal;

/// Authenticated engineer extractor.
///
/// Any valid bearer token passes; the principal carries the role for
/// handlers that care.
#[derive(Debug)]
pub struct AuthEngineer(pub Principal);

impl<S> FromRequestParts<S> for AuthEngineer
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let principal = backend.authenticate(&token)?;

        Ok(AuthEngineer(principal))
    }
}

/// Admin-only extractor.
///
/// Like `AuthEngineer` but rejects tokens without the admin role with
/// 403 FORBIDDEN. Use this for moderation and deletion endpoints.
#[derive(Debug)]
pub struct AdminUser(pub Principal);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthEngineer(principal) = AuthEngineer::from_request_parts(parts, state).await?;

        if !principal.is_admin() {
            return Err(AuthError::NotAdmin);
        }

        Ok(AdminUser(principal))
    }
}
