//! Mock storage service implementation
//!
//! Records uploads and destroys in memory for test assertions, with
//! injectable failures per resource kind. Thread-safe via `Arc<Mutex<>>`.

use std::sync::{Arc, Mutex};

use crate::{ResourceKind, StorageError, StorageService, StoredObject, UploadRequest};

/// One recorded upload call.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub file_name: String,
    pub folder: String,
    pub kind: ResourceKind,
    pub size_bytes: usize,
    pub public_id: String,
}

#[derive(Default)]
struct MockState {
    uploads: Vec<RecordedUpload>,
    destroyed: Vec<(String, ResourceKind)>,
    fail_kinds: Vec<ResourceKind>,
    fail_destroys: bool,
    counter: usize,
}

/// Mock storage service that records calls for test assertions.
#[derive(Clone, Default)]
pub struct MockStorageService {
    state: Arc<Mutex<MockState>>,
}

impl MockStorageService {
    /// Create a new mock storage service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload of the given kind fail.
    pub fn fail_uploads_of(&self, kind: ResourceKind) {
        self.lock().fail_kinds.push(kind);
    }

    /// Make every destroy call fail (for testing that cleanup failures
    /// never mask the primary error).
    pub fn fail_destroys(&self) {
        self.lock().fail_destroys = true;
    }

    /// Return all recorded uploads.
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.lock().uploads.clone()
    }

    /// Return all recorded destroy calls.
    pub fn destroyed(&self) -> Vec<(String, ResourceKind)> {
        self.lock().destroyed.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state
            .lock()
            .expect("mock storage lock poisoned — prior test panicked")
    }
}

#[async_trait::async_trait]
impl StorageService for MockStorageService {
    async fn upload(&self, request: UploadRequest) -> Result<StoredObject, StorageError> {
        let mut state = self.lock();

        if state.fail_kinds.contains(&request.kind) {
            tracing::debug!(kind = %request.kind, "Mock storage: injected upload failure");
            return Err(StorageError::Response(format!(
                "injected {} upload failure",
                request.kind
            )));
        }

        state.counter += 1;
        let public_id = format!("{}/{}-{}", request.folder, request.file_name, state.counter);
        let stored = StoredObject {
            public_id: public_id.clone(),
            secure_url: format!("https://res.cloudinary.test/{public_id}"),
        };

        state.uploads.push(RecordedUpload {
            file_name: request.file_name,
            folder: request.folder,
            kind: request.kind,
            size_bytes: request.bytes.len(),
            public_id,
        });

        Ok(stored)
    }

    async fn destroy(&self, public_id: &str, kind: ResourceKind) -> Result<(), StorageError> {
        let mut state = self.lock();

        if state.fail_destroys {
            tracing::debug!(public_id = %public_id, "Mock storage: injected destroy failure");
            return Err(StorageError::Response(
                "injected destroy failure".to_string(),
            ));
        }

        state.destroyed.push((public_id.to_string(), kind));
        Ok(())
    }
}
