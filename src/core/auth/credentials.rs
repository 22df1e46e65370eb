//! Credential and token types

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// A client registered with the identity authority, bound to one scope
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceCredential {
    pub client_id: String,
    pub authority_url: String,
    pub client_secret: String,
    pub scope: String,
}

impl ServiceCredential {
    pub fn new(
        client_id: impl Into<String>,
        authority_url: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            authority_url: authority_url.into(),
            client_secret: client_secret.into(),
            scope: scope.into(),
        }
    }

    /// Token endpoint of the v2 authority
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/oauth2/v2.0/token",
            self.authority_url.trim_end_matches('/')
        )
    }
}

impl fmt::Debug for ServiceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredential")
            .field("client_id", &self.client_id)
            .field("authority_url", &self.authority_url)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// OAuth2 bearer token
#[derive(Clone)]
pub struct AccessToken {
    pub value: String,
    pub scope: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scope: scope.into(),
            expires_at: None,
        }
    }

    /// Set expiry relative to now. Returns `None` when the instant is not representable.
    pub fn with_expires_in(mut self, seconds: i64) -> Option<Self> {
        let lifetime = TimeDelta::try_seconds(seconds)?;
        self.expires_at = Some(Utc::now().checked_add_signed(lifetime)?);
        Some(self)
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| Utc::now() >= expires_at)
    }

    pub fn secret(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
