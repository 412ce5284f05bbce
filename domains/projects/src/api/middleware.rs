//! Projects domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use handasa_auth::AuthBackend;
use handasa_storage::StorageService;

use crate::repository::ProjectsRepositories;

/// Application state for the Projects domain
#[derive(Clone)]
pub struct ProjectsState {
    pub repos: ProjectsRepositories,
    pub storage: Arc<dyn StorageService>,
    pub auth: AuthBackend,
}

impl FromRef<ProjectsState> for AuthBackend {
    fn from_ref(state: &ProjectsState) -> Self {
        state.auth.clone()
    }
}
