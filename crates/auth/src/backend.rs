//! Concrete authentication backend
//!
//! Wraps the auth configuration and turns raw bearer tokens into typed
//! principals. Tokens are self-contained (id, name, email, role), so no
//! database lookup happens here.

use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwt::validate_jwt_token;
use crate::principal::{Principal, Role};

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Verify a bearer token and build the typed principal
    pub fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = validate_jwt_token(token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.id).map_err(|_| AuthError::InvalidUserId)?;

        Ok(Principal {
            id: user_id,
            name: claims.name,
            email: claims.email,
            role: Role::from_claim(&claims.role),
        })
    }
}
