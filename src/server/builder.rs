//! Startup sequence
//!
//! Loads configuration, resolves the directory site, then starts serving.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::Result;
use tracing::{info, warn};

/// Run the broker with configuration from the environment
pub async fn run_server() -> Result<()> {
    info!("Starting embed broker");

    let config = Config::from_env()?;
    let (state, site_resolver) = AppState::from_config(config)?;

    // The registry is populated before the listener binds, so no request can
    // observe a half-initialized site identifier.
    site_resolver.initialize(&state.sites).await;
    if !state.sites.is_ready() {
        warn!("Serving without a site identifier; RLS requests will fail until restart");
    }

    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/embed-info - Embed URL and token for a report");

    HttpServer::new(state).start().await
}
