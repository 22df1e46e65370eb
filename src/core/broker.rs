//! Embed request orchestration
//!
//! One inbound call moves through `validate -> resolve role (RLS only) ->
//! compose token`. Row-level security fails closed: when it is requested and
//! no role is found, no token is ever requested.

use crate::core::directory::RoleResolver;
use crate::core::reporting::EmbedTokenComposer;
use crate::core::types::{EmbedQuery, EmbedRequest, EmbedResult, RoleName};
use crate::utils::error::{BrokerError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Source of a user's row-level-security role on a report
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleSource: Send + Sync {
    async fn resolve_role(&self, user_email: &str, report_id: &str) -> Result<Option<RoleName>>;
}

/// Source of embed tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbedTokenSource: Send + Sync {
    async fn compose_embed_token(
        &self,
        request: &EmbedRequest,
        role: Option<RoleName>,
    ) -> Result<EmbedResult>;
}

#[async_trait]
impl RoleSource for RoleResolver {
    async fn resolve_role(&self, user_email: &str, report_id: &str) -> Result<Option<RoleName>> {
        RoleResolver::resolve_role(self, user_email, report_id).await
    }
}

#[async_trait]
impl EmbedTokenSource for EmbedTokenComposer {
    async fn compose_embed_token(
        &self,
        request: &EmbedRequest,
        role: Option<RoleName>,
    ) -> Result<EmbedResult> {
        EmbedTokenComposer::compose_embed_token(self, request, role).await
    }
}

/// Handles embed-info requests
#[derive(Clone)]
pub struct EmbedBroker {
    roles: Arc<dyn RoleSource>,
    tokens: Arc<dyn EmbedTokenSource>,
}

impl EmbedBroker {
    pub fn new(roles: Arc<dyn RoleSource>, tokens: Arc<dyn EmbedTokenSource>) -> Self {
        Self { roles, tokens }
    }

    /// Validate the query, resolve the role when RLS is requested, then compose the token
    pub async fn handle(&self, query: EmbedQuery) -> Result<EmbedResult> {
        let request = query.validate()?;

        let role = if request.has_rls {
            let role = self
                .roles
                .resolve_role(&request.user_email, &request.report_id)
                .await?;
            match role {
                Some(role) => Some(role),
                None => {
                    return Err(BrokerError::authorization_denied(format!(
                        "no role assigned on report {}",
                        request.report_id
                    )));
                }
            }
        } else {
            debug!(report_id = %request.report_id, "RLS not requested; embedding without identity");
            None
        };

        let result = self.tokens.compose_embed_token(&request, role).await?;
        info!(
            report_id = %result.report_id,
            roles = ?result.used_roles,
            "Issued embed token"
        );
        Ok(result)
    }
}
