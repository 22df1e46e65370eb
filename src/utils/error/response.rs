//! HTTP response handling for errors

use super::types::BrokerError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

/// Body of a 400 response
pub const MISSING_PARAMETERS_MESSAGE: &str = "Missing required query parameters";
/// Body of a 403 response
pub const AUTHORIZATION_DENIED_MESSAGE: &str = "User not authorized in SharePoint Security List";
/// Body of every 500 response
pub const TOKEN_FAILURE_MESSAGE: &str = "Failed to generate Power BI Embed Token";

impl ResponseError for BrokerError {
    fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::Validation(_) => StatusCode::BAD_REQUEST,
            BrokerError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            BrokerError::Validation(_) => ErrorResponse::new(MISSING_PARAMETERS_MESSAGE),
            BrokerError::AuthorizationDenied(_) => ErrorResponse::new(AUTHORIZATION_DENIED_MESSAGE),
            other => ErrorResponse::with_details(TOKEN_FAILURE_MESSAGE, other.details()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Standard error response format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details<S: Into<String>>(error: S, details: serde_json::Value) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
