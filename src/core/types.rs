//! Data model for the embed flow
//!
//! Inbound query parameters, the validated request, the token-generation
//! payload sent to the report-hosting service and the result returned to the
//! front-end.

use crate::utils::error::{BrokerError, Result};
use serde::{Deserialize, Serialize};

/// Name of a row-level-security role
pub type RoleName = String;

/// Value of `hasRLS` that enables row-level security
pub const RLS_ENABLED: &str = "yes";

/// Raw query parameters of `GET /api/embed-info`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedQuery {
    pub user_email: Option<String>,
    pub report_id: Option<String>,
    pub dataset_id: Option<String>,
    pub report_workspace_id: Option<String>,
    pub dataset_workspace_id: Option<String>,
    #[serde(rename = "hasRLS")]
    pub has_rls: Option<String>,
}

impl EmbedQuery {
    /// Check that every identifying field is present and non-blank
    pub fn validate(self) -> Result<EmbedRequest> {
        let fields = [
            ("userEmail", &self.user_email),
            ("reportId", &self.report_id),
            ("datasetId", &self.dataset_id),
            ("reportWorkspaceId", &self.report_workspace_id),
            ("datasetWorkspaceId", &self.dataset_workspace_id),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(BrokerError::validation(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        Ok(EmbedRequest {
            has_rls: self.has_rls.as_deref() == Some(RLS_ENABLED),
            user_email: self.user_email.unwrap_or_default(),
            report_id: self.report_id.unwrap_or_default(),
            dataset_id: self.dataset_id.unwrap_or_default(),
            report_workspace_id: self.report_workspace_id.unwrap_or_default(),
            dataset_workspace_id: self.dataset_workspace_id.unwrap_or_default(),
        })
    }
}

/// A validated embed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    pub user_email: String,
    pub report_id: String,
    pub dataset_id: String,
    pub report_workspace_id: String,
    pub dataset_workspace_id: String,
    pub has_rls: bool,
}

/// Reference to a dataset, report or workspace by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

impl ResourceRef {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into() }
    }
}

/// Access level granted by an embed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    View,
}

/// Identity the embed token is bound to when row-level security applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveIdentity {
    pub username: String,
    pub roles: Vec<RoleName>,
    pub datasets: Vec<String>,
}

/// Body of the report-hosting service's generate-token call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGenerationRequest {
    pub datasets: Vec<ResourceRef>,
    pub reports: Vec<ResourceRef>,
    pub target_workspaces: Vec<ResourceRef>,
    pub access_level: AccessLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identities: Option<Vec<EffectiveIdentity>>,
}

/// Successful response of `GET /api/embed-info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedResult {
    pub embed_url: String,
    pub embed_token: String,
    pub report_id: String,
    pub used_roles: Vec<RoleName>,
}
