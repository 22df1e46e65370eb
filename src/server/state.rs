//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::auth::CredentialAcquirer;
use crate::core::broker::EmbedBroker;
use crate::core::directory::{DirectoryClient, RoleResolver, SiteRegistry, SiteResolver};
use crate::core::reporting::{EmbedTokenComposer, ReportingClient};
use crate::core::upstream::build_http_client;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap cloning into each worker.
#[derive(Clone)]
pub struct AppState {
    /// Broker configuration (shared read-only)
    pub config: Arc<Config>,
    /// Request orchestration
    pub broker: Arc<EmbedBroker>,
    /// Process-wide site identifier
    pub sites: Arc<SiteRegistry>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, broker: EmbedBroker, sites: Arc<SiteRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            broker: Arc::new(broker),
            sites,
        }
    }

    /// Wire the broker's collaborators from configuration.
    ///
    /// Returns the state together with the resolver that must populate the
    /// site registry before traffic is accepted.
    pub fn from_config(config: Config) -> Result<(Self, SiteResolver)> {
        let http_client = build_http_client(config.upstream.timeout())?;
        let acquirer = CredentialAcquirer::new(http_client.clone());
        let directory = DirectoryClient::new(http_client.clone(), &config.directory.base_url)?;
        let reporting = ReportingClient::new(http_client, &config.reporting.base_url)?;
        let sites = Arc::new(SiteRegistry::new());

        let site_resolver = SiteResolver::new(
            directory.clone(),
            acquirer.clone(),
            config.identity.directory_credential(),
            &config.directory.site_name,
        );
        let roles = RoleResolver::new(
            directory,
            acquirer.clone(),
            config.identity.directory_credential(),
            Arc::clone(&sites),
            &config.directory.role_list_name,
        );
        let composer = EmbedTokenComposer::new(
            reporting,
            acquirer,
            config.identity.reporting_credential(),
        );

        let broker = EmbedBroker::new(Arc::new(roles), Arc::new(composer));
        Ok((Self::new(config, broker, sites), site_resolver))
    }
}
