//! Repository implementations for the Projects domain

pub mod memory;
pub mod projects;

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

pub use memory::InMemoryProjectStore;
pub use projects::ProjectRepository;

use crate::domain::entities::{Project, ProjectStatus, ProjectView};
use handasa_common::Result;

/// Persistence seam for the Projects domain.
///
/// The production implementation is `ProjectRepository`; tests drive the
/// handlers and the submission flow with `InMemoryProjectStore` instead.
#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a new project record.
    async fn insert(&self, project: &Project) -> Result<Project>;

    /// Find a single project, enriched with the engineer profile.
    async fn find(&self, id: Uuid) -> Result<Option<ProjectView>>;

    /// List projects with the given status, newest first. Never returns
    /// projects carrying any other status.
    async fn list_by_status(&self, status: ProjectStatus) -> Result<Vec<ProjectView>>;

    /// List all projects owned by an engineer, newest first.
    async fn list_by_engineer(&self, engineer_id: Uuid) -> Result<Vec<ProjectView>>;

    /// Overwrite a project's status. Returns false when no row matched.
    async fn update_status(&self, id: Uuid, status: ProjectStatus) -> Result<bool>;

    /// Permanently delete a project row. Returns false when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Combined repository access for the Projects domain
#[derive(Clone)]
pub struct ProjectsRepositories {
    pub projects: Arc<dyn ProjectStore>,
}

impl ProjectsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: Arc::new(ProjectRepository::new(pool)),
        }
    }

    /// Assemble over an arbitrary store (tests swap in the in-memory one).
    pub fn with_store(projects: Arc<dyn ProjectStore>) -> Self {
        Self { projects }
    }
}
