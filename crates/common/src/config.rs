//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Cloudinary object storage credentials
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,

    /// Shared secret for verifying collaborator-issued JWTs
    pub jwt_secret: String,

    /// Comma-separated list of allowed CORS origins
    pub allowed_origins: Vec<String>,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_CLOUD_NAME is required"))?,
            cloudinary_api_key: env::var("CLOUDINARY_API_KEY")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_API_KEY is required"))?,
            cloudinary_api_secret: env::var("CLOUDINARY_API_SECRET")
                .map_err(|_| anyhow::anyhow!("CLOUDINARY_API_SECRET is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "handasa=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .unwrap_or(4000),
        };

        Ok(config)
    }
}
