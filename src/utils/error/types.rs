//! Error type definitions

use std::fmt;
use thiserror::Error;

/// Result type alias for the broker
pub type Result<T> = std::result::Result<T, BrokerError>;

/// External services the broker talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamService {
    /// Directory service holding the site and the role-assignment list
    Directory,
    /// Report-hosting service issuing embed tokens
    ReportHosting,
}

impl UpstreamService {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamService::Directory => "directory",
            UpstreamService::ReportHosting => "report-hosting",
        }
    }
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the broker
#[derive(Error, Debug)]
pub enum BrokerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed inbound parameters
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential exchange rejected or the authority was unreachable
    #[error("Authentication error for client {client_id}: {message}")]
    Auth { client_id: String, message: String },

    /// Directory or report-hosting service returned an error or was unreachable
    #[error("{service} request failed{}: {payload}", status_suffix(.status))]
    Upstream {
        service: UpstreamService,
        status: Option<u16>,
        payload: serde_json::Value,
    },

    /// Row-level security was requested but no role matched the user
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Site search returned no results
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    /// The site identifier has not been resolved
    #[error("Site identifier not ready: {0}")]
    SiteNotReady(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" with status {}", code))
        .unwrap_or_default()
}
