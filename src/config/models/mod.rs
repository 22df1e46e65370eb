//! Configuration data models
//!
//! This module defines all configuration structures used throughout the broker.

pub mod identity;
pub mod logging;
pub mod server;
pub mod upstream;

// Re-export all configuration types
pub use identity::*;
pub use logging::*;
pub use server::*;
pub use upstream::*;

/// Default bind address
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default upstream call timeout in seconds
pub fn default_timeout() -> u64 {
    30
}
