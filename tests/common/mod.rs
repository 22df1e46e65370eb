//! Common test utilities for embed-broker

pub mod fixtures;
pub mod upstream;

// Re-export commonly used items
pub use fixtures::{RoleRowFactory, embed_uri};
pub use upstream::{TestUpstream, call};
