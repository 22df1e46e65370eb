//! # embed-broker
//!
//! Backend token broker for an embedded report viewer.
//!
//! The viewer cannot hold long-lived secrets, so this service exchanges two
//! service-principal identities for short-lived artifacts:
//!
//! - a directory lookup of the user's row-level-security role for a report
//! - a report-scoped embed token, bound to that role when RLS is requested
//!
//! ## Running
//!
//! ```bash
//! TENANT_ID=... SP_APP_ID=... SP_APP_SECRET=... \
//! PBI_APP_ID=... PBI_APP_SECRET=... embed-broker
//! ```
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use embed_broker::{Config, server::{AppState, HttpServer}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let (state, site_resolver) = AppState::from_config(config)?;
//!     site_resolver.initialize(&state.sites).await;
//!     HttpServer::new(state).start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::broker::{EmbedBroker, EmbedTokenSource, RoleSource};
pub use crate::core::types::{EmbedQuery, EmbedRequest, EmbedResult, TokenGenerationRequest};
pub use crate::utils::error::{BrokerError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build information for this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
