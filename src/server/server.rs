//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{CorsConfig, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{BrokerError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, http::Method, middleware::DefaultHeaders, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Build the CORS policy for the embedding front-end
    pub fn cors(config: &CorsConfig) -> Cors {
        let mut cors = Cors::default()
            .allowed_methods(vec![Method::GET, Method::OPTIONS])
            .allow_any_header()
            .max_age(config.max_age as usize);

        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        if config.allow_credentials {
            cors = cors.supports_credentials();
        }

        cors
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || {
            let cors = Self::cors(&state.config.server.cors);
            App::new()
                .app_data(state.clone())
                .wrap(cors)
                .wrap(TracingLogger::default())
                .wrap(DefaultHeaders::new().add(("Server", "embed-broker")))
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .map_err(|e| BrokerError::server(format!("Failed to bind to {}: {}", bind_addr, e)))?
        .run();

        info!("API listening on {}", bind_addr);

        server
            .await
            .map_err(|e| BrokerError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
