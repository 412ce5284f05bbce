//! Strongly-typed authenticated principal
//!
//! Replaces the loose claims bag with one value constructed by the auth
//! layer and passed into handlers, never mutated downstream.

use uuid::Uuid;

/// Role carried by a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Engineer,
    Admin,
}

impl Role {
    /// Map the token's role claim. Anything that is not "admin" is an
    /// ordinary engineer account.
    pub fn from_claim(role: &str) -> Self {
        if role == "admin" {
            Role::Admin
        } else {
            Role::Engineer
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Engineer => write!(f, "engineer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The authenticated caller, built once per request by the auth layer
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
