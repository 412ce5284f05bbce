//! HTTP API assembly for Handasa

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use sqlx::PgPool;

use handasa_auth::{AuthBackend, AuthConfig};
use handasa_common::Config;
use handasa_projects::{ProjectsRepositories, ProjectsState};
use handasa_storage::{cloudinary::CloudinaryClient, StorageConfig, StorageService};

/// Request body ceiling: both attachments may individually reach the
/// 50 MiB upload-gate maximum, so the limit covers two of them plus
/// multipart framing and the text fields. Oversized attachments inside
/// the limit are rejected by the upload gate with a proper message.
const BODY_LIMIT_BYTES: usize = 104 * 1024 * 1024;

/// Create the main application router with all routes and state
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let storage: Arc<dyn StorageService> = Arc::new(CloudinaryClient::new(StorageConfig {
        cloud_name: config.cloudinary_cloud_name.clone(),
        api_key: config.cloudinary_api_key.clone(),
        api_secret: config.cloudinary_api_secret.clone(),
    }));

    Ok(create_app_with_storage(&config, pool, storage))
}

/// Router assembly with an injected storage service (tests swap in the
/// mock here).
pub fn create_app_with_storage(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn StorageService>,
) -> Router {
    create_app_with_store(config, ProjectsRepositories::new(pool), storage)
}

/// Router assembly over an arbitrary store and storage service; the
/// full-stack tests run on the in-memory implementations.
pub fn create_app_with_store(
    config: &Config,
    repos: ProjectsRepositories,
    storage: Arc<dyn StorageService>,
) -> Router {
    let auth = AuthBackend::new(AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
    });

    let state = ProjectsState {
        repos,
        storage,
        auth,
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Handasa API v0.1.0" }))
        .merge(handasa_projects::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
