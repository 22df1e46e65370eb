//! Upstream service configuration

use super::default_timeout;
use std::time::Duration;

/// Directory service settings
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub base_url: String,
    /// Display name of the site holding the role-assignment list
    pub site_name: String,
    /// Name of the role-assignment list
    pub role_list_name: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_graph_base_url(),
            site_name: default_site_name(),
            role_list_name: default_role_list_name(),
        }
    }
}

impl DirectoryConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_base_url("directory", &self.base_url)?;
        if self.site_name.trim().is_empty() {
            return Err("Site name cannot be empty".to_string());
        }
        if self.role_list_name.trim().is_empty() {
            return Err("Role list name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Report-hosting service settings
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    pub base_url: String,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            base_url: default_powerbi_base_url(),
        }
    }
}

impl ReportingConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_base_url("report-hosting", &self.base_url)
    }
}

/// Settings shared by every outbound call
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("Timeout cannot be 0".to_string());
        }
        Ok(())
    }
}

fn validate_base_url(name: &str, raw: &str) -> Result<(), String> {
    let url = url::Url::parse(raw).map_err(|e| format!("Invalid {} URL '{}': {}", name, raw, e))?;
    if url.cannot_be_a_base() {
        return Err(format!("Invalid {} URL '{}': not a base URL", name, raw));
    }
    Ok(())
}

fn default_graph_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_powerbi_base_url() -> String {
    "https://api.powerbi.com/v1.0/myorg".to_string()
}

fn default_site_name() -> String {
    "PowerBiConfiguration".to_string()
}

fn default_role_list_name() -> String {
    "PowerBISecurityRoles".to_string()
}
