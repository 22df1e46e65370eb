//! Health check endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub site_ready: bool,
    pub version: Cow<'static, str>,
}

/// Basic health check endpoint
///
/// Reports `degraded` when the site identifier is unavailable, since RLS
/// requests cannot succeed in that state. Never calls upstream services.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let site_ready = state.sites.is_ready();
    let health_status = HealthStatus {
        status: Cow::Borrowed(if site_ready { "healthy" } else { "degraded" }),
        site_ready,
        version: Cow::Borrowed(crate::VERSION),
    };

    HttpResponse::Ok().json(health_status)
}
