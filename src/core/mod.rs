//! Core broker functionality
//!
//! Credential acquisition, role resolution against the directory, embed token
//! composition against the report-hosting service, and the orchestration that
//! ties them together.

pub mod auth;
pub mod broker;
pub mod directory;
pub mod reporting;
pub mod types;
pub mod upstream;
