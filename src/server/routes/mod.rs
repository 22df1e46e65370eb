//! HTTP route modules

pub mod embed;
pub mod health;

use crate::utils::error::BrokerError;
use actix_web::web;

/// Register every route and the shared extractor configuration
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Undecodable query strings get the same 400 body as missing parameters
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| BrokerError::validation(err.to_string()).into()),
    )
    .configure(health::configure_routes)
    .configure(embed::configure_routes);
}
