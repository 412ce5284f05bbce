//! Route definitions for the Projects domain API

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::projects;
use super::middleware::ProjectsState;

/// Create all Projects domain API routes
pub fn routes() -> Router<ProjectsState> {
    Router::new()
        .route("/projects/upload", post(projects::upload_project))
        .route("/projects/approved", get(projects::list_approved))
        .route("/projects/pending", get(projects::list_pending))
        .route("/projects/user-projects", get(projects::list_user_projects))
        .route("/projects/status/{status}", get(projects::list_by_status))
        .route("/projects/review/{id}", put(projects::review_project))
        .route("/projects/delete", post(projects::delete_project))
        .route("/projects/hide", post(projects::hide_project))
        // Registered last so the fixed paths above are never shadowed by
        // the id capture
        .route("/projects/{id}", get(projects::get_project))
}
