//! OAuth2 client-credentials exchange

use super::credentials::{AccessToken, ServiceCredential};
use crate::utils::error::{BrokerError, Result};
use serde::Deserialize;
use tracing::{debug, warn};

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Error body returned by the authority on rejection
#[derive(Debug, Deserialize)]
struct AuthorityError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Obtains bearer tokens for service credentials.
///
/// Every call performs a fresh exchange; nothing is cached and failures are
/// never retried here.
#[derive(Debug, Clone)]
pub struct CredentialAcquirer {
    http_client: reqwest::Client,
}

impl CredentialAcquirer {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Exchange the credential's client id and secret for an access token
    pub async fn acquire(&self, credential: &ServiceCredential) -> Result<AccessToken> {
        debug!(client_id = %credential.client_id, scope = %credential.scope, "Acquiring access token");

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", credential.client_id.as_str()),
            ("client_secret", credential.client_secret.as_str()),
            ("scope", credential.scope.as_str()),
        ];

        let response = self
            .http_client
            .post(credential.token_endpoint())
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                BrokerError::auth(
                    &credential.client_id,
                    format!("authority unreachable: {}", e.without_url()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<AuthorityError>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or_else(|| format!("authority returned status {}", status.as_u16()));
            warn!(client_id = %credential.client_id, status = status.as_u16(), "Credential exchange rejected");
            return Err(BrokerError::auth(&credential.client_id, reason));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            BrokerError::auth(
                &credential.client_id,
                format!("invalid token response: {}", e.without_url()),
            )
        })?;

        if let Some(token_type) = token.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                return Err(BrokerError::auth(
                    &credential.client_id,
                    format!("unsupported token_type: {}", token_type),
                ));
            }
        }

        let mut access_token = AccessToken::new(token.access_token, &credential.scope);
        if let Some(expires_in) = token.expires_in {
            access_token = access_token.with_expires_in(expires_in).ok_or_else(|| {
                BrokerError::auth(
                    &credential.client_id,
                    format!("invalid expires_in: {}", expires_in),
                )
            })?;
        }
        if access_token.is_expired() {
            warn!(client_id = %credential.client_id, "Authority issued an already expired token");
            return Err(BrokerError::auth(&credential.client_id, "token already expired"));
        }

        debug!(client_id = %credential.client_id, expires_at = ?access_token.expires_at, "Access token acquired");
        Ok(access_token)
    }
}
