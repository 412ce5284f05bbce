//! Project repository

use crate::domain::entities::{Project, ProjectStatus, ProjectView};
use crate::repository::ProjectStore;
use handasa_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the projects table, used for SELECT and RETURNING clauses.
const PROJECT_COLUMNS: &str = "\
    id, engineer_id, name, description, category, \
    image, file, original_file_name, status, created_at";

/// Projects joined with the engineer's public profile fields.
///
/// `users` belongs to the accounts collaborator; the LEFT JOIN keeps
/// projects visible even when the reference cannot be resolved.
const VIEW_COLUMNS: &str = "\
    p.id, p.engineer_id, p.name, p.description, p.category, \
    p.image, p.file, p.original_file_name, p.status, p.created_at, \
    u.name AS engineer_name, u.email AS engineer_email";

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a single project by ID, enriched with the engineer profile
    pub async fn find(&self, id: Uuid) -> Result<Option<ProjectView>> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM projects p \
             LEFT JOIN users u ON u.id = p.engineer_id \
             WHERE p.id = $1"
        );
        let project = sqlx::query_as::<_, ProjectView>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    /// List projects with the given status, newest first
    pub async fn list_by_status(&self, status: ProjectStatus) -> Result<Vec<ProjectView>> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM projects p \
             LEFT JOIN users u ON u.id = p.engineer_id \
             WHERE p.status = $1 ORDER BY p.created_at DESC"
        );
        let projects = sqlx::query_as::<_, ProjectView>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    /// List all projects owned by an engineer, newest first
    pub async fn list_by_engineer(&self, engineer_id: Uuid) -> Result<Vec<ProjectView>> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM projects p \
             LEFT JOIN users u ON u.id = p.engineer_id \
             WHERE p.engineer_id = $1 ORDER BY p.created_at DESC"
        );
        let projects = sqlx::query_as::<_, ProjectView>(&query)
            .bind(engineer_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    /// Create a new project row
    pub async fn create(&self, project: &Project) -> Result<Project> {
        let query = format!(
            "INSERT INTO projects ({PROJECT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PROJECT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(project.engineer_id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(&project.category)
            .bind(&project.image)
            .bind(&project.file)
            .bind(&project.original_file_name)
            .bind(project.status)
            .bind(project.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Overwrite a project's status. Returns false when no row matched.
    pub async fn update_status(&self, id: Uuid, status: ProjectStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE projects SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a project row. Remote storage objects are left
    /// in place. Returns false when no row matched.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ProjectStore for ProjectRepository {
    async fn insert(&self, project: &Project) -> Result<Project> {
        self.create(project).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<ProjectView>> {
        self.find(id).await
    }

    async fn list_by_status(&self, status: ProjectStatus) -> Result<Vec<ProjectView>> {
        self.list_by_status(status).await
    }

    async fn list_by_engineer(&self, engineer_id: Uuid) -> Result<Vec<ProjectView>> {
        self.list_by_engineer(engineer_id).await
    }

    async fn update_status(&self, id: Uuid, status: ProjectStatus) -> Result<bool> {
        self.update_status(id, status).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.delete(id).await
    }
}
