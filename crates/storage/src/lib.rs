//! Handasa object storage service
//!
//! Binary assets (project images, CAD files) live in Cloudinary. This
//! crate provides:
//! - The `StorageService` trait used by domain code
//! - A Cloudinary HTTP client for production
//! - A mock service for testing that records calls and injects failures
//!
//! Uploads return a durable URL plus the provider-side id needed for
//! later deletion. There is no transaction with the database; callers
//! own the compensating-delete pattern.

pub mod cloudinary;
pub mod mock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage configuration error: {0}")]
    Configuration(String),

    #[error("Storage request error: {0}")]
    Request(String),

    #[error("Storage response error: {0}")]
    Response(String),
}

/// Provider-side resource type of an upload.
///
/// Images go through the provider's image pipeline; CAD files are
/// opaque binary ("raw") objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Raw,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Raw => "raw",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single upload to perform
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File content
    pub bytes: Vec<u8>,
    /// Original client-side filename (kept by the provider)
    pub file_name: String,
    /// Provider folder, e.g. "projects/images"
    pub folder: String,
    pub kind: ResourceKind,
}

/// A successfully stored object
#[derive(Debug, Clone, Deserialize)]
pub struct StoredObject {
    /// Provider-side identifier, required for deletion
    pub public_id: String,
    /// Durable HTTPS URL
    pub secure_url: String,
}

/// Storage service configuration.
#[derive(Clone)]
pub struct StorageConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl StorageConfig {
    /// Create storage config from environment variables.
    pub fn from_env() -> Result<Self, StorageError> {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME").map_err(|_| {
            StorageError::Configuration("CLOUDINARY_CLOUD_NAME is required".to_string())
        })?;
        let api_key = std::env::var("CLOUDINARY_API_KEY").map_err(|_| {
            StorageError::Configuration("CLOUDINARY_API_KEY is required".to_string())
        })?;
        let api_secret = std::env::var("CLOUDINARY_API_SECRET").map_err(|_| {
            StorageError::Configuration("CLOUDINARY_API_SECRET is required".to_string())
        })?;

        Ok(Self {
            cloud_name,
            api_key,
            api_secret,
        })
    }
}

/// Storage service trait for different implementations.
#[async_trait::async_trait]
pub trait StorageService: Send + Sync {
    /// Upload an asset, returning its durable URL and provider id.
    async fn upload(&self, request: UploadRequest) -> Result<StoredObject, StorageError>;

    /// Delete an asset by provider id. Callers treat failures as
    /// best-effort cleanup and must not let them mask the primary error.
    async fn destroy(&self, public_id: &str, kind: ResourceKind) -> Result<(), StorageError>;
}
