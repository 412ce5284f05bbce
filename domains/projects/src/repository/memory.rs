//! In-memory project store for tests
//!
//! Implements the full `ProjectStore` surface over a `Mutex<Vec<_>>` so
//! handlers and the submission flow run without a database. Matches the
//! production repository's contract: status listings never leak other
//! statuses, and all listings are newest first.

use std::sync::Mutex;

use uuid::Uuid;

use handasa_common::{Error, Result};

use crate::domain::entities::{Project, ProjectStatus, ProjectView};
use crate::repository::ProjectStore;

/// In-memory `ProjectStore` with an injectable insert failure.
#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: Mutex<Vec<Project>>,
    fail_inserts: Mutex<bool>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `insert` fail.
    pub fn fail_inserts(&self) {
        *self.fail_inserts.lock().unwrap() = true;
    }

    /// Snapshot of everything stored so far.
    pub fn stored(&self) -> Vec<Project> {
        self.projects.lock().unwrap().clone()
    }

    fn view(project: &Project) -> ProjectView {
        ProjectView {
            id: project.id,
            engineer_id: project.engineer_id,
            name: project.name.clone(),
            description: project.description.clone(),
            category: project.category.clone(),
            image: project.image.clone(),
            file: project.file.clone(),
            original_file_name: project.original_file_name.clone(),
            status: project.status,
            created_at: project.created_at,
            // The engineer profile join has nothing to resolve against
            engineer_name: None,
            engineer_email: None,
        }
    }

    fn views_newest_first(projects: Vec<&Project>) -> Vec<ProjectView> {
        let mut views: Vec<ProjectView> = projects.into_iter().map(Self::view).collect();
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        views
    }
}

#[async_trait::async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn insert(&self, project: &Project) -> Result<Project> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(Error::Internal("injected insert failure".to_string()));
        }
        self.projects.lock().unwrap().push(project.clone());
        Ok(project.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<ProjectView>> {
        let projects = self.projects.lock().unwrap();
        Ok(projects.iter().find(|p| p.id == id).map(Self::view))
    }

    async fn list_by_status(&self, status: ProjectStatus) -> Result<Vec<ProjectView>> {
        let projects = self.projects.lock().unwrap();
        Ok(Self::views_newest_first(
            projects.iter().filter(|p| p.status == status).collect(),
        ))
    }

    async fn list_by_engineer(&self, engineer_id: Uuid) -> Result<Vec<ProjectView>> {
        let projects = self.projects.lock().unwrap();
        Ok(Self::views_newest_first(
            projects
                .iter()
                .filter(|p| p.engineer_id == engineer_id)
                .collect(),
        ))
    }

    async fn update_status(&self, id: Uuid, status: ProjectStatus) -> Result<bool> {
        let mut projects = self.projects.lock().unwrap();
        match projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                project.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() < before)
    }
}
