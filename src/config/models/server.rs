//! Server configuration

use super::*;
use tracing::warn;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        self.cors.validate()
    }
}

/// CORS configuration
///
/// The embedding front-end runs on a fixed site origin and sends credentials,
/// so wildcard origins are rejected.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins
    pub allowed_origins: Vec<String>,
    /// Max age for preflight requests
    pub max_age: u32,
    /// Allow credentials
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_cors_origins(),
            max_age: default_cors_max_age(),
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Parse a comma separated origin list, dropping blanks
    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }

    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_origins.iter().any(|origin| origin == "*") && self.allow_credentials {
            return Err(
                "CORS cannot allow all origins (*) when credentials are enabled".to_string(),
            );
        }

        if self.allowed_origins.is_empty() {
            warn!("CORS allows no origins; browsers will not be able to call the broker");
        }

        Ok(())
    }
}

fn default_cors_origins() -> Vec<String> {
    vec!["https://digilabsolutions0.sharepoint.com".to_string()]
}

fn default_cors_max_age() -> u32 {
    3600
}
