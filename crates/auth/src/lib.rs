//! Authentication middleware for the Handasa API
//!
//! Verifies collaborator-issued JWTs and exposes axum extractors that
//! work with any state implementing `FromRef<S>` for `AuthBackend`.
//! Account management (login, registration) lives in the collaborator's
//! service; this crate only validates what it issues.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod jwt;
mod principal;

pub use backend::AuthBackend;
pub use claims::Claims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{AdminUser, AuthEngineer};
pub use principal::{Principal, Role};
