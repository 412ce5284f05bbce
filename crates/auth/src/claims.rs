//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by collaborator-issued tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Email
    pub email: Option<String>,
    /// Role ("admin" or "engineer")
    pub role: String,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}
