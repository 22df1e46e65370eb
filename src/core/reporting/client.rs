//! Report-hosting service HTTP client

use crate::core::auth::AccessToken;
use crate::core::types::TokenGenerationRequest;
use crate::core::upstream::{authorized, join_segments, parse_base_url, send_json};
use crate::utils::error::{Result, UpstreamService};
use serde::Deserialize;
use url::Url;

/// Report metadata needed by the embedding client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub id: String,
    pub embed_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dataset_id: Option<String>,
}

/// Response of the generate-token call
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedToken {
    pub token: String,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub expiration: Option<String>,
}

/// Client for the report-hosting service
#[derive(Debug, Clone)]
pub struct ReportingClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ReportingClient {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetch a report within a workspace
    pub async fn get_report(
        &self,
        token: &AccessToken,
        workspace_id: &str,
        report_id: &str,
    ) -> Result<ReportMetadata> {
        let url = join_segments(
            &self.base_url,
            &["groups", workspace_id, "reports", report_id],
        );
        let request = authorized(self.http_client.get(url), token);
        send_json(UpstreamService::ReportHosting, request).await
    }

    /// Request a scoped embed token
    pub async fn generate_token(
        &self,
        token: &AccessToken,
        body: &TokenGenerationRequest,
    ) -> Result<GeneratedToken> {
        let url = join_segments(&self.base_url, &["GenerateToken"]);
        let request = authorized(self.http_client.post(url), token).json(body);
        send_json(UpstreamService::ReportHosting, request).await
    }
}
