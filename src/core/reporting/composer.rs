//! Embed token composition

use super::client::ReportingClient;
use crate::core::auth::{CredentialAcquirer, ServiceCredential};
use crate::core::types::{
    AccessLevel, EffectiveIdentity, EmbedRequest, EmbedResult, ResourceRef, RoleName,
    TokenGenerationRequest,
};
use crate::utils::error::Result;
use tracing::debug;

/// Workspaces the token must cover: the report's, plus the dataset's when different
pub fn target_workspaces(report_workspace_id: &str, dataset_workspace_id: &str) -> Vec<ResourceRef> {
    let mut workspaces = vec![ResourceRef::new(report_workspace_id)];
    if dataset_workspace_id != report_workspace_id {
        workspaces.push(ResourceRef::new(dataset_workspace_id));
    }
    workspaces
}

/// Build the generate-token body; an identity is bound only when a role is given
pub fn build_token_request(request: &EmbedRequest, role: Option<&RoleName>) -> TokenGenerationRequest {
    let identities = role.map(|role| {
        vec![EffectiveIdentity {
            username: request.user_email.clone(),
            roles: vec![role.clone()],
            datasets: vec![request.dataset_id.clone()],
        }]
    });

    TokenGenerationRequest {
        datasets: vec![ResourceRef::new(&request.dataset_id)],
        reports: vec![ResourceRef::new(&request.report_id)],
        target_workspaces: target_workspaces(
            &request.report_workspace_id,
            &request.dataset_workspace_id,
        ),
        access_level: AccessLevel::View,
        identities,
    }
}

/// Fetches report metadata and a scoped embed token
#[derive(Debug, Clone)]
pub struct EmbedTokenComposer {
    reporting: ReportingClient,
    acquirer: CredentialAcquirer,
    credential: ServiceCredential,
}

impl EmbedTokenComposer {
    pub fn new(
        reporting: ReportingClient,
        acquirer: CredentialAcquirer,
        credential: ServiceCredential,
    ) -> Self {
        Self {
            reporting,
            acquirer,
            credential,
        }
    }

    pub async fn compose_embed_token(
        &self,
        request: &EmbedRequest,
        role: Option<RoleName>,
    ) -> Result<EmbedResult> {
        let token = self.acquirer.acquire(&self.credential).await?;

        let report = self
            .reporting
            .get_report(&token, &request.report_workspace_id, &request.report_id)
            .await?;
        debug!(
            report_id = %report.id,
            name = report.name.as_deref().unwrap_or_default(),
            dataset_id = report.dataset_id.as_deref().unwrap_or_default(),
            "Fetched report metadata"
        );

        let body = build_token_request(request, role.as_ref());
        debug!(
            report_id = %request.report_id,
            workspaces = body.target_workspaces.len(),
            rls = body.identities.is_some(),
            "Requesting embed token"
        );
        let generated = self.reporting.generate_token(&token, &body).await?;
        debug!(
            token_id = generated.token_id.as_deref().unwrap_or_default(),
            expiration = generated.expiration.as_deref().unwrap_or_default(),
            "Embed token issued"
        );

        Ok(EmbedResult {
            embed_url: report.embed_url,
            embed_token: generated.token,
            report_id: report.id,
            used_roles: role.into_iter().collect(),
        })
    }
}
