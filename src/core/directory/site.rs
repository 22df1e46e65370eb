//! Site resolution and the process-wide site identifier

use super::client::DirectoryClient;
use crate::core::auth::{CredentialAcquirer, ServiceCredential};
use crate::utils::error::{BrokerError, Result};
use parking_lot::RwLock;
use std::fmt;
use tracing::{debug, error, info};

/// Durable identifier of the directory site holding the role list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteIdentifier(String);

impl SiteIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of the site identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteState {
    /// Initialization has not completed
    Pending,
    /// Resolved; never invalidated for the life of the process
    Ready(SiteIdentifier),
    /// Initialization ran and failed
    Failed(String),
}

/// Holder of the site identifier shared by every role lookup.
///
/// Written once during startup, read by every request afterwards.
#[derive(Debug)]
pub struct SiteRegistry {
    state: RwLock<SiteState>,
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteRegistry {
    /// Create a registry awaiting initialization
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SiteState::Pending),
        }
    }

    /// Create a registry that is already resolved
    pub fn ready(id: SiteIdentifier) -> Self {
        Self {
            state: RwLock::new(SiteState::Ready(id)),
        }
    }

    pub fn state(&self) -> SiteState {
        self.state.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), SiteState::Ready(_))
    }

    /// The resolved identifier, or `SiteNotReady` if resolution is pending or failed
    pub fn site_id(&self) -> Result<SiteIdentifier> {
        match &*self.state.read() {
            SiteState::Ready(id) => Ok(id.clone()),
            SiteState::Pending => Err(BrokerError::SiteNotReady(
                "site identifier has not been initialized".to_string(),
            )),
            SiteState::Failed(reason) => Err(BrokerError::SiteNotReady(format!(
                "site resolution failed: {}",
                reason
            ))),
        }
    }

    pub fn mark_ready(&self, id: SiteIdentifier) {
        *self.state.write() = SiteState::Ready(id);
    }

    pub fn mark_failed(&self, reason: impl Into<String>) {
        let mut state = self.state.write();
        // A resolved identifier is never replaced by a later failure
        if !matches!(*state, SiteState::Ready(_)) {
            *state = SiteState::Failed(reason.into());
        }
    }
}

/// Resolves the configured site display name to its identifier
#[derive(Debug, Clone)]
pub struct SiteResolver {
    directory: DirectoryClient,
    acquirer: CredentialAcquirer,
    credential: ServiceCredential,
    site_name: String,
}

impl SiteResolver {
    pub fn new(
        directory: DirectoryClient,
        acquirer: CredentialAcquirer,
        credential: ServiceCredential,
        site_name: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            acquirer,
            credential,
            site_name: site_name.into(),
        }
    }

    /// Look up the site and take the first search result
    pub async fn resolve_site_id(&self) -> Result<SiteIdentifier> {
        let token = self.acquirer.acquire(&self.credential).await?;
        let sites = self.directory.search_sites(&token, &self.site_name).await?;

        let site = sites
            .into_iter()
            .next()
            .ok_or_else(|| BrokerError::SiteNotFound(self.site_name.clone()))?;

        debug!(
            display_name = site.display_name.as_deref().unwrap_or_default(),
            web_url = site.web_url.as_deref().unwrap_or_default(),
            "Site search matched"
        );
        Ok(SiteIdentifier::new(site.id))
    }

    /// Resolve the site and record the outcome in the registry.
    ///
    /// Failure is logged and recorded, never propagated: the process keeps
    /// serving and role lookups report the site as not ready.
    pub async fn initialize(&self, registry: &SiteRegistry) {
        match self.resolve_site_id().await {
            Ok(site_id) => {
                info!(site_id = %site_id, site_name = %self.site_name, "Found directory site");
                registry.mark_ready(site_id);
            }
            Err(e) => {
                error!(site_name = %self.site_name, error = %e, "Could not resolve directory site");
                registry.mark_failed(e.to_string());
            }
        }
    }
}
