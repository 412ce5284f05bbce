//! Project submission flow
//!
//! Orchestrates validation → image upload → CAD upload → persistence.
//! Uploads and the database write are sequential and not transactional
//! across the storage boundary; on any failure after a partial upload,
//! already-uploaded assets get a best-effort delete. Cleanup failures
//! are logged and never mask the primary error.

use uuid::Uuid;

use handasa_common::{Error, Result};
use handasa_storage::{ResourceKind, StorageService, StoredObject, UploadRequest};

use crate::domain::entities::Project;
use crate::domain::upload::{Attachment, UploadGate};
use crate::repository::ProjectStore;

/// Storage folder for project preview images
const IMAGE_FOLDER: &str = "projects/images";

/// Storage folder for CAD assets
const CAD_FOLDER: &str = "projects/cad_files";

/// A submission as extracted from the multipart request
#[derive(Debug)]
pub struct NewSubmission {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<Attachment>,
    pub cad_file: Option<Attachment>,
}

/// Submit a new project on behalf of an authenticated engineer.
///
/// Returns the persisted pending project on success.
pub async fn submit_project<S: ProjectStore + ?Sized>(
    store: &S,
    storage: &dyn StorageService,
    engineer_id: Uuid,
    submission: NewSubmission,
) -> Result<Project> {
    let title = require_text(submission.title)?;
    let description = require_text(submission.description)?;
    let category = require_text(submission.category)?;

    // Both attachments must be present before the gate's finer checks
    let (image, cad_file) = match (submission.image, submission.cad_file) {
        (Some(image), Some(cad_file)) => (image, cad_file),
        _ => return Err(Error::Validation("يجب رفع صورة وملف CAD".to_string())),
    };

    UploadGate::validate(Some(&image), Some(&cad_file))?;
    let original_file_name = cad_file.file_name.clone();

    // Image first; nothing uploaded yet, so a failure needs no cleanup
    let stored_image = storage
        .upload(UploadRequest {
            bytes: image.bytes,
            file_name: image.file_name,
            folder: IMAGE_FOLDER.to_string(),
            kind: ResourceKind::Image,
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Image upload failed");
            Error::UploadFailed("فشل في رفع الصورة".to_string())
        })?;

    // CAD file second; its success gates the database write
    let stored_cad = match storage
        .upload(UploadRequest {
            bytes: cad_file.bytes,
            file_name: cad_file.file_name,
            folder: CAD_FOLDER.to_string(),
            kind: ResourceKind::Raw,
        })
        .await
    {
        Ok(stored) => stored,
        Err(e) => {
            tracing::error!(error = %e, "CAD upload failed");
            cleanup(storage, &stored_image, ResourceKind::Image).await;
            return Err(Error::UploadFailed("فشل في رفع ملف CAD".to_string()));
        }
    };

    let project = Project::new(
        engineer_id,
        title,
        description,
        category,
        stored_image.secure_url.clone(),
        stored_cad.secure_url.clone(),
        original_file_name,
    )?;

    match store.insert(&project).await {
        Ok(created) => {
            tracing::info!(project_id = %created.id, engineer_id = %engineer_id, "Project submitted");
            Ok(created)
        }
        Err(e) => {
            tracing::error!(error = %e, "Project persistence failed after uploads");
            cleanup(storage, &stored_image, ResourceKind::Image).await;
            cleanup(storage, &stored_cad, ResourceKind::Raw).await;
            Err(Error::Persistence("❌ حدث خطأ أثناء رفع المشروع.".to_string()))
        }
    }
}

fn require_text(value: Option<String>) -> Result<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(Error::Validation(
            "جميع الحقول مطلوبة (العنوان، الوصف، التصنيف)".to_string(),
        )),
    }
}

/// Best-effort delete of an already-uploaded asset. Failures are logged
/// and swallowed so they never override the error being reported.
async fn cleanup(storage: &dyn StorageService, object: &StoredObject, kind: ResourceKind) {
    if let Err(e) = storage.destroy(&object.public_id, kind).await {
        tracing::warn!(
            error = %e,
            public_id = %object.public_id,
            "Failed to clean up uploaded asset"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProjectStatus;
    use crate::domain::upload::MAX_SIZE_BYTES;
    use crate::repository::InMemoryProjectStore;
    use handasa_storage::mock::MockStorageService;

    fn attachment(file_name: &str, size: usize) -> Attachment {
        Attachment {
            file_name: file_name.to_string(),
            bytes: vec![0; size],
        }
    }

    fn bridge_submission() -> NewSubmission {
        NewSubmission {
            title: Some("Bridge Design".to_string()),
            description: Some("Steel truss".to_string()),
            category: Some("Civil".to_string()),
            image: Some(attachment("bridge.png", 1024)),
            cad_file: Some(attachment("bridge.dwg", 8 * 1024 * 1024)),
        }
    }

    #[tokio::test]
    async fn test_valid_submission_persists_pending_project() {
        let store = InMemoryProjectStore::new();
        let storage = MockStorageService::new();
        let engineer_id = Uuid::new_v4();

        let project = submit_project(&store, &storage, engineer_id, bridge_submission())
            .await
            .expect("submission succeeds");

        assert_eq!(project.name, "Bridge Design");
        assert_eq!(project.category, "Civil");
        assert_eq!(project.status, ProjectStatus::Pending);
        assert_eq!(project.engineer_id, engineer_id);
        assert_eq!(project.original_file_name, "bridge.dwg");
        assert!(project.image.starts_with("https://"));
        assert!(project.file.starts_with("https://"));

        // Exactly one record, two uploads, no cleanup
        assert_eq!(store.stored().len(), 1);
        assert_eq!(storage.uploads().len(), 2);
        assert!(storage.destroyed().is_empty());
    }

    #[tokio::test]
    async fn test_missing_text_field_rejected_before_any_upload() {
        let store = InMemoryProjectStore::new();
        let storage = MockStorageService::new();

        let mut submission = bridge_submission();
        submission.category = None;

        let result = submit_project(&store, &storage, Uuid::new_v4(), submission).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(storage.uploads().is_empty());
        assert!(store.stored().is_empty());
    }

    #[tokio::test]
    async fn test_missing_attachment_rejected_before_any_upload() {
        let store = InMemoryProjectStore::new();
        let storage = MockStorageService::new();

        let mut submission = bridge_submission();
        submission.cad_file = None;

        let result = submit_project(&store, &storage, Uuid::new_v4(), submission).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(storage.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_cad_file_never_reaches_storage() {
        let store = InMemoryProjectStore::new();
        let storage = MockStorageService::new();

        let mut submission = bridge_submission();
        submission.cad_file = Some(attachment("bridge.dwg", MAX_SIZE_BYTES + 1));

        let result = submit_project(&store, &storage, Uuid::new_v4(), submission).await;
        match result {
            Err(Error::TooLarge(message)) => assert!(message.contains("50MB")),
            other => panic!("expected TooLarge, got {other:?}"),
        }
        assert!(storage.uploads().is_empty());
        assert!(store.stored().is_empty());
    }

    #[tokio::test]
    async fn test_cad_failure_cleans_up_uploaded_image() {
        let store = InMemoryProjectStore::new();
        let storage = MockStorageService::new();
        storage.fail_uploads_of(ResourceKind::Raw);

        let result = submit_project(&store, &storage, Uuid::new_v4(), bridge_submission()).await;
        assert!(matches!(result, Err(Error::UploadFailed(_))));

        // No record persisted, and a delete was issued for the image
        assert!(store.stored().is_empty());
        let uploads = storage.uploads();
        assert_eq!(uploads.len(), 1);
        let destroyed = storage.destroyed();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].0, uploads[0].public_id);
        assert_eq!(destroyed[0].1, ResourceKind::Image);
    }

    #[tokio::test]
    async fn test_persistence_failure_cleans_up_both_assets() {
        let store = InMemoryProjectStore::new();
        store.fail_inserts();
        let storage = MockStorageService::new();

        let result = submit_project(&store, &storage, Uuid::new_v4(), bridge_submission()).await;
        assert!(matches!(result, Err(Error::Persistence(_))));

        let destroyed = storage.destroyed();
        assert_eq!(destroyed.len(), 2);
        assert!(destroyed.iter().any(|(_, kind)| *kind == ResourceKind::Image));
        assert!(destroyed.iter().any(|(_, kind)| *kind == ResourceKind::Raw));
    }

    #[tokio::test]
    async fn test_cleanup_failure_never_masks_the_primary_error() {
        let store = InMemoryProjectStore::new();
        let storage = MockStorageService::new();
        storage.fail_uploads_of(ResourceKind::Raw);
        storage.fail_destroys();

        let result = submit_project(&store, &storage, Uuid::new_v4(), bridge_submission()).await;
        // Still the CAD upload error, not the destroy error
        assert!(matches!(result, Err(Error::UploadFailed(_))));
    }

    #[tokio::test]
    async fn test_large_cad_uploads_as_raw() {
        let store = InMemoryProjectStore::new();
        let storage = MockStorageService::new();

        let mut submission = bridge_submission();
        submission.cad_file = Some(attachment("tower.dwg", 12 * 1024 * 1024));

        submit_project(&store, &storage, Uuid::new_v4(), submission)
            .await
            .expect("submission succeeds");

        let uploads = storage.uploads();
        let cad = uploads
            .iter()
            .find(|u| u.kind == ResourceKind::Raw)
            .expect("CAD upload recorded");
        assert_eq!(cad.folder, "projects/cad_files");
        assert_eq!(cad.size_bytes, 12 * 1024 * 1024);
    }
}
