//! Configuration loading utilities
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file in the working directory.

use super::models::*;
use super::Config;
use crate::utils::error::{BrokerError, Result};
use tracing::{debug, info};

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment overrides from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => return Err(BrokerError::Config(format!("Failed to read .env: {}", e))),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup and validate it
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment variables");

        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        // Server configuration
        if let Some(host) = var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = var("PORT") {
            config.server.port = port
                .trim()
                .parse()
                .map_err(|e| BrokerError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(origins) = var("CORS_ALLOWED_ORIGINS") {
            config.server.cors.allowed_origins = CorsConfig::parse_origins(&origins);
        }

        // Identity configuration
        config.identity.tenant_id = var("TENANT_ID").unwrap_or_default();
        if let Some(authority) = var("AUTHORITY_HOST") {
            config.identity.authority_host = authority;
        }
        config.identity.directory = ClientSecretConfig {
            client_id: var("SP_APP_ID").unwrap_or_default(),
            client_secret: var("SP_APP_SECRET").unwrap_or_default(),
        };
        config.identity.reporting = ClientSecretConfig {
            client_id: var("PBI_APP_ID").unwrap_or_default(),
            client_secret: var("PBI_APP_SECRET").unwrap_or_default(),
        };

        // Upstream services
        if let Some(url) = var("GRAPH_BASE_URL") {
            config.directory.base_url = url;
        }
        if let Some(name) = var("SITE_NAME") {
            config.directory.site_name = name;
        }
        if let Some(name) = var("ROLE_LIST_NAME") {
            config.directory.role_list_name = name;
        }
        if let Some(url) = var("POWERBI_BASE_URL") {
            config.reporting.base_url = url;
        }
        if let Some(timeout) = var("UPSTREAM_TIMEOUT_SECS") {
            config.upstream.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e| BrokerError::Config(format!("Invalid timeout: {}", e)))?;
        }

        config.validate()?;

        debug!("Configuration loaded from environment variables");
        Ok(config)
    }
}
