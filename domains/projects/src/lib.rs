//! Projects domain: engineer CAD submissions, admin moderation, public listings

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Project, ProjectStatus, ProjectView};
pub use domain::state::ModerationEvent;
pub use domain::upload::{Attachment, UploadGate, UploadGateError};

// Re-export repository types
pub use repository::{
    InMemoryProjectStore, ProjectRepository, ProjectStore, ProjectsRepositories,
};

// Re-export API types
pub use api::routes;
pub use api::ProjectsState;
