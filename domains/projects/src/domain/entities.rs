//! Domain entities for the Projects domain
//!
//! A project row exists only after both asset uploads succeed; everything
//! except `status` is write-once after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use handasa_common::{Error, Result};

/// Project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Hidden,
}

impl ProjectStatus {
    /// Whether projects with this status appear in public listings
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Pending => write!(f, "pending"),
            ProjectStatus::Approved => write!(f, "approved"),
            ProjectStatus::Rejected => write!(f, "rejected"),
            ProjectStatus::Hidden => write!(f, "hidden"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProjectStatus::Pending),
            "approved" => Ok(ProjectStatus::Approved),
            "rejected" => Ok(ProjectStatus::Rejected),
            "hidden" => Ok(ProjectStatus::Hidden),
            _ => Err(()),
        }
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub engineer_id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Durable URL of the preview image, set exactly once at creation
    pub image: String,
    /// Durable URL of the CAD asset, same lifecycle as `image`
    pub file: String,
    /// Client-side filename of the CAD asset, kept for download display
    pub original_file_name: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new pending project with validation.
    ///
    /// Both URLs must already exist; the submission flow only builds the
    /// entity after both uploads succeeded.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        engineer_id: Uuid,
        name: String,
        description: String,
        category: String,
        image: String,
        file: String,
        original_file_name: String,
    ) -> Result<Self> {
        if name.trim().is_empty() || description.trim().is_empty() || category.trim().is_empty() {
            return Err(Error::Validation(
                "جميع الحقول مطلوبة (العنوان، الوصف، التصنيف)".to_string(),
            ));
        }

        Ok(Project {
            id: Uuid::new_v4(),
            engineer_id,
            name,
            description,
            category,
            image,
            file,
            original_file_name,
            status: ProjectStatus::default(),
            created_at: Utc::now(),
        })
    }
}

/// Project enriched with the owning engineer's public profile fields.
///
/// Read model for listings and detail views; `users` is owned by the
/// accounts collaborator and joined read-only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectView {
    pub id: Uuid,
    pub engineer_id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub file: String,
    pub original_file_name: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub engineer_name: Option<String>,
    pub engineer_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_project() -> Result<Project> {
        Project::new(
            Uuid::new_v4(),
            "Bridge Design".to_string(),
            "Steel truss".to_string(),
            "Civil".to_string(),
            "https://res.cloudinary.test/projects/images/bridge.png".to_string(),
            "https://res.cloudinary.test/projects/cad_files/bridge.dwg".to_string(),
            "bridge.dwg".to_string(),
        )
    }

    #[test]
    fn test_new_project_defaults_to_pending() {
        let project = valid_project().expect("valid project");
        assert_eq!(project.status, ProjectStatus::Pending);
    }

    #[test]
    fn test_new_project_rejects_blank_fields() {
        let result = Project::new(
            Uuid::new_v4(),
            "  ".to_string(),
            "Steel truss".to_string(),
            "Civil".to_string(),
            "img".to_string(),
            "file".to_string(),
            "bridge.dwg".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_only_approved_is_public() {
        assert!(ProjectStatus::Approved.is_public());
        assert!(!ProjectStatus::Pending.is_public());
        assert!(!ProjectStatus::Rejected.is_public());
        assert!(!ProjectStatus::Hidden.is_public());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            ProjectStatus::Pending,
            ProjectStatus::Approved,
            ProjectStatus::Rejected,
            ProjectStatus::Hidden,
        ] {
            assert_eq!(status.to_string().parse::<ProjectStatus>(), Ok(status));
        }
        assert!("cancelled".parse::<ProjectStatus>().is_err());
    }
}
