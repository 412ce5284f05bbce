//! Shared utilities, configuration, and error handling for Handasa
//!
//! This crate provides common functionality used across the Handasa backend:
//! - Configuration management following 12-factor principles
//! - Error types and the JSON response envelope

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
