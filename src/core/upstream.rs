//! Shared plumbing for outbound calls to the directory and report-hosting
//! services

use crate::core::auth::AccessToken;
use crate::utils::error::{BrokerError, Result, UpstreamService};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::error;
use url::Url;

/// Build the HTTP client used for every upstream call
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| BrokerError::config(format!("Failed to build HTTP client: {}", e)))
}

/// Parse a configured base URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| BrokerError::config(format!("Invalid URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(BrokerError::config(format!("Invalid URL '{}': not a base URL", raw)));
    }
    Ok(url)
}

/// Append path segments to a base URL, percent-encoding each one
pub fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Attach the bearer token to a request
pub fn authorized(request: reqwest::RequestBuilder, token: &AccessToken) -> reqwest::RequestBuilder {
    request.bearer_auth(token.secret())
}

/// Send a request and decode a 2xx JSON body.
///
/// Non-2xx responses become `Upstream` errors carrying the service's own body,
/// parsed as JSON when possible and as a string otherwise.
pub async fn send_json<T: DeserializeOwned>(
    service: UpstreamService,
    request: reqwest::RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| BrokerError::transport(service, e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let payload = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
        error!(
            service = %service,
            status = status.as_u16(),
            payload = %payload,
            "Upstream call failed"
        );
        return Err(BrokerError::upstream(service, Some(status.as_u16()), payload));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| BrokerError::transport(service, format!("invalid response body: {}", e.without_url())))
}
