//! Projects domain API handlers

pub mod projects;
