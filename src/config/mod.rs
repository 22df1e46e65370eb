//! Configuration management for the broker
//!
//! This module handles loading and validation of all broker configuration.

pub mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{BrokerError, Result};
use tracing::debug;

/// Main configuration struct for the broker
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Listener settings
    pub server: ServerConfig,
    /// Identity authority and service principals
    pub identity: IdentityConfig,
    /// Directory service settings
    pub directory: DirectoryConfig,
    /// Report-hosting service settings
    pub reporting: ReportingConfig,
    /// Outbound call settings
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| BrokerError::Config(format!("Server config error: {}", e)))?;

        self.identity
            .validate()
            .map_err(|e| BrokerError::Config(format!("Identity config error: {}", e)))?;

        self.directory
            .validate()
            .map_err(|e| BrokerError::Config(format!("Directory config error: {}", e)))?;

        self.reporting
            .validate()
            .map_err(|e| BrokerError::Config(format!("Reporting config error: {}", e)))?;

        self.upstream
            .validate()
            .map_err(|e| BrokerError::Config(format!("Upstream config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
