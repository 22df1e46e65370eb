//! Helper functions for creating specific error types

use super::types::{BrokerError, UpstreamService};

impl BrokerError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth<C: Into<String>, S: Into<String>>(client_id: C, message: S) -> Self {
        Self::Auth {
            client_id: client_id.into(),
            message: message.into(),
        }
    }

    pub fn upstream(service: UpstreamService, status: Option<u16>, payload: serde_json::Value) -> Self {
        Self::Upstream {
            service,
            status,
            payload,
        }
    }

    /// Transport-level failure (connect, timeout, malformed body)
    pub fn transport<S: Into<String>>(service: UpstreamService, message: S) -> Self {
        Self::Upstream {
            service,
            status: None,
            payload: serde_json::Value::String(message.into()),
        }
    }

    pub fn authorization_denied<S: Into<String>>(message: S) -> Self {
        Self::AuthorizationDenied(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    /// Diagnostic payload placed in the `details` member of a 500 response.
    ///
    /// Upstream payloads are passed through verbatim, preferring their `error`
    /// member when one is present. Other failures expose only their message.
    pub fn details(&self) -> serde_json::Value {
        match self {
            BrokerError::Upstream { payload, .. } => match payload.get("error") {
                Some(inner) if !inner.is_null() => inner.clone(),
                _ => payload.clone(),
            },
            other => serde_json::Value::String(other.to_string()),
        }
    }

    /// Whether the failure is the caller's fault rather than the broker's
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BrokerError::Validation(_) | BrokerError::AuthorizationDenied(_)
        )
    }
}
