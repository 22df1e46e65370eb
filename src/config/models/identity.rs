//! Service-principal configuration

use crate::core::auth::ServiceCredential;
use std::fmt;

/// Scope requested for the directory-scope identity
pub const DIRECTORY_SCOPE: &str = "https://graph.microsoft.com/.default";
/// Scope requested for the report-scope identity
pub const REPORTING_SCOPE: &str = "https://analysis.windows.net/powerbi/api/.default";

/// Default identity authority host
pub fn default_authority_host() -> String {
    "https://login.microsoftonline.com".to_string()
}

/// A client id / secret pair registered with the identity authority
#[derive(Clone, Default)]
pub struct ClientSecretConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientSecretConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSecretConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Identity authority and the two service principals
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Tenant identifier appended to the authority host
    pub tenant_id: String,
    pub authority_host: String,
    /// Principal used against the directory service
    pub directory: ClientSecretConfig,
    /// Principal used against the report-hosting service
    pub reporting: ClientSecretConfig,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            authority_host: default_authority_host(),
            directory: ClientSecretConfig::default(),
            reporting: ClientSecretConfig::default(),
        }
    }
}

impl IdentityConfig {
    /// Authority URL shared by both principals
    pub fn authority_url(&self) -> String {
        format!(
            "{}/{}",
            self.authority_host.trim_end_matches('/'),
            self.tenant_id.trim()
        )
    }

    pub fn directory_credential(&self) -> ServiceCredential {
        ServiceCredential::new(
            &self.directory.client_id,
            self.authority_url(),
            &self.directory.client_secret,
            DIRECTORY_SCOPE,
        )
    }

    pub fn reporting_credential(&self) -> ServiceCredential {
        ServiceCredential::new(
            &self.reporting.client_id,
            self.authority_url(),
            &self.reporting.client_secret,
            REPORTING_SCOPE,
        )
    }

    /// Validate identity configuration
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("TENANT_ID", &self.tenant_id),
            ("SP_APP_ID", &self.directory.client_id),
            ("SP_APP_SECRET", &self.directory.client_secret),
            ("PBI_APP_ID", &self.reporting.client_id),
            ("PBI_APP_SECRET", &self.reporting.client_secret),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(format!("Missing required settings: {}", missing.join(", ")));
        }

        url::Url::parse(&self.authority_host)
            .map_err(|e| format!("Invalid authority host '{}': {}", self.authority_host, e))?;

        Ok(())
    }
}
