//! embed-broker - embed token broker for report viewers

use embed_broker::config::LogFormat;
use embed_broker::{NAME, VERSION, build_info, server};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging system
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false);
    match LogFormat::from_env() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    info!(version = VERSION, git_hash = build_info().git_hash, "{}", NAME);

    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
