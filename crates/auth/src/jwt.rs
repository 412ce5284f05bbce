//! JWT validation and token extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Validate a collaborator-issued JWT
pub(crate) fn validate_jwt_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens carry no aud claim; expiry is still enforced
    validation.validate_aud = false;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        // Valid bearer token
        let header = HeaderValue::from_static("Bearer abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "abc123");

        // Invalid format
        let header = HeaderValue::from_static("abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_err());

        // Basic auth (wrong type)
        let header = HeaderValue::from_static("Basic abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_rejects_garbage() {
        let config = AuthConfig {
            jwt_secret: "test_secret".to_string(),
        };

        let result = validate_jwt_token("not_a_token", &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_roundtrip() {
        let config = AuthConfig {
            jwt_secret: "test-secret-key".to_string(),
        };

        // Token shaped like what the collaborator's Node service signs
        let user_id = uuid::Uuid::new_v4().to_string();
        let claims = Claims {
            id: user_id.clone(),
            name: Some("Sara".to_string()),
            email: Some("sara@test.com".to_string()),
            role: "engineer".to_string(),
            iat: chrono::Utc::now().timestamp() as u64,
            exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        };

        let header = jsonwebtoken::Header::new(Algorithm::HS256);
        let encoding_key = jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_ref());
        let token =
            jsonwebtoken::encode(&header, &claims, &encoding_key).expect("Failed to encode JWT");

        let result = validate_jwt_token(&token, &config);
        assert!(result.is_ok(), "JWT validation failed: {:?}", result.err());

        let decoded = result.unwrap();
        assert_eq!(decoded.id, user_id);
        assert_eq!(decoded.role, "engineer");
        assert_eq!(decoded.email, claims.email);
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let claims = Claims {
            id: uuid::Uuid::new_v4().to_string(),
            name: None,
            email: None,
            role: "admin".to_string(),
            iat: chrono::Utc::now().timestamp() as u64,
            exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        };

        let header = jsonwebtoken::Header::new(Algorithm::HS256);
        let encoding_key = jsonwebtoken::EncodingKey::from_secret(b"secret-a");
        let token =
            jsonwebtoken::encode(&header, &claims, &encoding_key).expect("Failed to encode JWT");

        let config = AuthConfig {
            jwt_secret: "secret-b".to_string(),
        };
        assert!(validate_jwt_token(&token, &config).is_err());
    }

    #[test]
    fn test_jwt_rejects_expired() {
        let config = AuthConfig {
            jwt_secret: "test-secret-key".to_string(),
        };

        let claims = Claims {
            id: uuid::Uuid::new_v4().to_string(),
            name: None,
            email: None,
            role: "engineer".to_string(),
            iat: (chrono::Utc::now().timestamp() - 7200) as u64,
            exp: (chrono::Utc::now().timestamp() - 3600) as u64,
        };

        let header = jsonwebtoken::Header::new(Algorithm::HS256);
        let encoding_key = jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_ref());
        let token =
            jsonwebtoken::encode(&header, &claims, &encoding_key).expect("Failed to encode JWT");

        assert!(validate_jwt_token(&token, &config).is_err());
    }
}
