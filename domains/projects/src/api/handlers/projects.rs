//! Project management API handlers

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use handasa_auth::{AdminUser, AuthEngineer};
use handasa_common::{Error, Result};

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{Project, ProjectStatus, ProjectView};
use crate::repository::ProjectStore;
use crate::domain::state::ModerationEvent;
use crate::domain::upload::Attachment;
use crate::service::{self, NewSubmission};

/// Created-project summary returned by the upload endpoint
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub status: ProjectStatus,
}

impl From<Project> for ProjectSummary {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category,
            status: p.status,
        }
    }
}

/// Project response DTO, enriched with the engineer's profile.
///
/// `title` duplicates `name` for the frontend's naming.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub id: Uuid,
    pub title: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub file: String,
    pub original_file_name: String,
    pub status: ProjectStatus,
    pub date: DateTime<Utc>,
    pub engineer_id: Uuid,
    pub engineer_name: String,
    pub engineer_email: String,
}

impl From<ProjectView> for ProjectData {
    fn from(p: ProjectView) -> Self {
        Self {
            id: p.id,
            title: p.name.clone(),
            name: p.name,
            description: p.description,
            category: p.category,
            image: p.image,
            file: p.file,
            original_file_name: p.original_file_name,
            status: p.status,
            date: p.created_at,
            engineer_id: p.engineer_id,
            // Placeholder when the user reference cannot be resolved
            engineer_name: p.engineer_name.unwrap_or_else(|| "غير محدد".to_string()),
            engineer_email: p.engineer_email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadProjectResponse {
    pub success: bool,
    pub message: String,
    pub project: ProjectSummary,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub data: Vec<ProjectData>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub success: bool,
    pub data: ProjectData,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Review request body
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: String,
}

/// Body carrying a single project id (delete/hide)
#[derive(Debug, Deserialize)]
pub struct ProjectIdRequest {
    pub id: String,
}

fn list_response(projects: Vec<ProjectView>) -> Json<ProjectListResponse> {
    Json(ProjectListResponse {
        success: true,
        data: projects.into_iter().map(Into::into).collect(),
    })
}

fn parse_project_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::InvalidId("❌ معرف المشروع غير صحيح".to_string()))
}

/// Submit a new project (engineer, multipart)
pub async fn upload_project(
    AuthEngineer(principal): AuthEngineer,
    State(state): State<ProjectsState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadProjectResponse>)> {
    let mut submission = NewSubmission {
        title: None,
        description: None,
        category: None,
        image: None,
        cad_file: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| Error::Validation("فشل في قراءة الملفات المرفوعة".to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => submission.title = Some(read_text(field).await?),
            "description" => submission.description = Some(read_text(field).await?),
            "category" => submission.category = Some(read_text(field).await?),
            "image" => submission.image = Some(read_attachment(field, "image").await?),
            "file" => submission.cad_file = Some(read_attachment(field, "file").await?),
            _ => {
                tracing::debug!(field = %name, "Ignoring unknown multipart field");
            }
        }
    }

    let project = service::submit_project(
        state.repos.projects.as_ref(),
        state.storage.as_ref(),
        principal.id,
        submission,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadProjectResponse {
            success: true,
            message: "✅ تم إرسال المشروع بنجاح وفي انتظار موافقة الإدارة.".to_string(),
            project: project.into(),
        }),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|_| Error::Validation("فشل في قراءة الحقول المرسلة".to_string()))
}

async fn read_attachment(
    field: axum::extract::multipart::Field<'_>,
    fallback_name: &str,
) -> Result<Attachment> {
    let file_name = field
        .file_name()
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback_name)
        .to_string();

    let bytes = field
        .bytes()
        .await
        .map_err(|_| Error::Validation("فشل في قراءة الملفات المرفوعة".to_string()))?;

    Ok(Attachment {
        file_name,
        bytes: bytes.to_vec(),
    })
}

/// Publicly list approved projects, newest first
pub async fn list_approved(
    State(state): State<ProjectsState>,
) -> Result<Json<ProjectListResponse>> {
    let projects = state
        .repos
        .projects
        .list_by_status(ProjectStatus::Approved)
        .await?;
    Ok(list_response(projects))
}

/// List projects awaiting review (admin)
pub async fn list_pending(
    AdminUser(_admin): AdminUser,
    State(state): State<ProjectsState>,
) -> Result<Json<ProjectListResponse>> {
    let projects = state
        .repos
        .projects
        .list_by_status(ProjectStatus::Pending)
        .await?;
    Ok(list_response(projects))
}

/// List the calling engineer's own projects
pub async fn list_user_projects(
    AuthEngineer(principal): AuthEngineer,
    State(state): State<ProjectsState>,
) -> Result<Json<ProjectListResponse>> {
    let projects = state.repos.projects.list_by_engineer(principal.id).await?;
    Ok(list_response(projects))
}

/// List projects with an arbitrary status (admin)
pub async fn list_by_status(
    AdminUser(_admin): AdminUser,
    State(state): State<ProjectsState>,
    Path(status): Path<String>,
) -> Result<Json<ProjectListResponse>> {
    let status: ProjectStatus = status
        .parse()
        .map_err(|_| Error::Validation("❌ حالة غير صالحة".to_string()))?;

    let projects = state.repos.projects.list_by_status(status).await?;
    Ok(list_response(projects))
}

/// Approve or reject a project (admin)
pub async fn review_project(
    AdminUser(admin): AdminUser,
    State(state): State<ProjectsState>,
    Path(id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<MessageResponse>> {
    // Target validation first: an invalid target never touches the store
    let event = ModerationEvent::review(&request.status)
        .ok_or_else(|| Error::Validation("❌ حالة غير صالحة".to_string()))?;

    let project_id = parse_project_id(&id)?;

    let updated = state
        .repos
        .projects
        .update_status(project_id, event.target())
        .await?;
    if !updated {
        return Err(Error::NotFound("❌ المشروع غير موجود".to_string()));
    }

    tracing::info!(project_id = %project_id, admin_id = %admin.id, event = %event, "Project reviewed");

    Ok(Json(MessageResponse {
        success: true,
        message: "✅ تم تحديث حالة المشروع بنجاح".to_string(),
    }))
}

/// Permanently delete a project row (admin). Storage objects are left
/// in place.
pub async fn delete_project(
    AdminUser(admin): AdminUser,
    State(state): State<ProjectsState>,
    Json(request): Json<ProjectIdRequest>,
) -> Result<Json<MessageResponse>> {
    let project_id = parse_project_id(&request.id)?;

    let deleted = state.repos.projects.delete(project_id).await?;
    if !deleted {
        return Err(Error::NotFound("❌ المشروع غير موجود".to_string()));
    }

    tracing::info!(project_id = %project_id, admin_id = %admin.id, "Project hard-deleted");

    Ok(Json(MessageResponse {
        success: true,
        message: "✅ تم حذف المشروع نهائياً بنجاح".to_string(),
    }))
}

/// Hide a project from public listings without deleting it (admin)
pub async fn hide_project(
    AdminUser(admin): AdminUser,
    State(state): State<ProjectsState>,
    Json(request): Json<ProjectIdRequest>,
) -> Result<Json<MessageResponse>> {
    let project_id = parse_project_id(&request.id)?;

    let updated = state
        .repos
        .projects
        .update_status(project_id, ModerationEvent::Hide.target())
        .await?;
    if !updated {
        return Err(Error::NotFound("❌ المشروع غير موجود".to_string()));
    }

    tracing::info!(project_id = %project_id, admin_id = %admin.id, "Project hidden");

    Ok(Json(MessageResponse {
        success: true,
        message: "✅ تم إخفاء المشروع من العرض بنجاح".to_string(),
    }))
}

/// Get a single project by id (public)
pub async fn get_project(
    State(state): State<ProjectsState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetailResponse>> {
    let project_id = parse_project_id(&id)?;

    let project = state
        .repos
        .projects
        .find(project_id)
        .await?
        .ok_or_else(|| Error::NotFound("❌ المشروع غير موجود".to_string()))?;

    Ok(Json(ProjectDetailResponse {
        success: true,
        data: project.into(),
    }))
}
