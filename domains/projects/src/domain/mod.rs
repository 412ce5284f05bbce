//! Domain layer: entities, moderation state machine, upload gate

pub mod entities;
pub mod state;
pub mod upload;
