//! Embed-info endpoint

use crate::core::types::EmbedQuery;
use crate::server::state::AppState;
use crate::utils::error::BrokerError;
use actix_web::{HttpResponse, web};
use tracing::{error, warn};

/// Configure embed routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/embed-info", web::get().to(embed_info));
}

/// Return the embed URL and a scoped embed token for a report
pub async fn embed_info(
    state: web::Data<AppState>,
    query: web::Query<EmbedQuery>,
) -> Result<HttpResponse, BrokerError> {
    match state.broker.handle(query.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => {
            if e.is_client_error() {
                warn!(error = %e, "Embed request rejected");
            } else {
                error!(error = %e, details = %e.details(), "Embed token generation failed");
            }
            Err(e)
        }
    }
}
