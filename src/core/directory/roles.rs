//! Row-level-security role resolution
//!
//! Each list row assigns one role on one report to a set of principals. A
//! user's role for a report is the role of the first row, in the order the
//! directory returns them, whose report id matches exactly and whose
//! principals include the user's email (compared trimmed and lowercased).

use super::client::{DirectoryClient, ListItem};
use super::site::SiteRegistry;
use crate::core::auth::{CredentialAcquirer, ServiceCredential};
use crate::core::types::RoleName;
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fold an email for comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// One entry of a row's `User` column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A bare identifier, typically the email itself
    Bare(String),
    /// An identity record; `email` is taken from `Email`, falling back to `email`
    Structured { email: Option<String> },
    /// Anything else (numbers, booleans, nulls); never matches
    Unrecognized,
}

impl Principal {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Principal::Bare(s.clone()),
            Value::Object(record) => {
                let email = ["Email", "email"].iter().find_map(|key| {
                    record
                        .get(*key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                });
                Principal::Structured { email }
            }
            _ => Principal::Unrecognized,
        }
    }

    /// Expand a `User` column into its principals; a single value is a one-element set
    pub fn expand(value: &Value) -> Vec<Self> {
        match value {
            Value::Null => Vec::new(),
            Value::Array(entries) => entries.iter().map(Self::from_value).collect(),
            other => vec![Self::from_value(other)],
        }
    }

    /// Normalized email, if the principal carries one
    pub fn canonical_email(&self) -> Option<String> {
        match self {
            Principal::Bare(s) => Some(normalize_email(s)),
            Principal::Structured { email } => email.as_deref().map(normalize_email),
            Principal::Unrecognized => None,
        }
    }
}

/// A role assignment read from the directory list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentRow {
    pub item_id: Option<String>,
    pub role_name: Option<RoleName>,
    pub report_id: Option<String>,
    pub principals: Vec<Principal>,
}

impl RoleAssignmentRow {
    /// Whether this row is for the report; identifiers are trimmed but compared case-sensitively
    pub fn is_for_report(&self, report_id: &str) -> bool {
        self.report_id
            .as_deref()
            .is_some_and(|id| id.trim() == report_id.trim())
    }

    /// Whether any principal's email equals the already-normalized target
    pub fn grants(&self, normalized_email: &str) -> bool {
        self.principals.iter().any(|principal| {
            let candidate = principal.canonical_email();
            debug!(
                candidate = candidate.as_deref().unwrap_or(""),
                target = normalized_email,
                "Comparing principal"
            );
            candidate.as_deref() == Some(normalized_email)
        })
    }
}

impl From<ListItem> for RoleAssignmentRow {
    fn from(item: ListItem) -> Self {
        let fields = item.fields;
        Self {
            item_id: item.id,
            role_name: fields.title.as_str().map(str::to_string),
            report_id: fields.report_id.as_str().map(str::to_string),
            principals: Principal::expand(&fields.user),
        }
    }
}

/// Find the user's role for a report.
///
/// The first matching row in list order wins. Later rows that also match with
/// a different role name are reported as conflicts but do not change the
/// result.
pub fn match_role(rows: &[RoleAssignmentRow], user_email: &str, report_id: &str) -> Option<RoleName> {
    let target = normalize_email(user_email);
    if target.is_empty() {
        return None;
    }

    let mut matched: Option<&str> = None;
    for row in rows {
        if !row.is_for_report(report_id) || !row.grants(&target) {
            continue;
        }

        let Some(role) = row.role_name.as_deref() else {
            warn!(item_id = ?row.item_id, "Matching role row has no role name; skipping");
            continue;
        };

        match matched {
            None => matched = Some(role),
            Some(first) if first != role => warn!(
                report_id = report_id,
                kept = first,
                ignored = role,
                item_id = ?row.item_id,
                "User has conflicting role assignments for report; keeping first"
            ),
            Some(_) => {}
        }
    }

    matched.map(str::to_string)
}

/// Resolves a user's role from the directory's role-assignment list
#[derive(Debug, Clone)]
pub struct RoleResolver {
    directory: DirectoryClient,
    acquirer: CredentialAcquirer,
    credential: ServiceCredential,
    sites: Arc<SiteRegistry>,
    list_name: String,
}

impl RoleResolver {
    pub fn new(
        directory: DirectoryClient,
        acquirer: CredentialAcquirer,
        credential: ServiceCredential,
        sites: Arc<SiteRegistry>,
        list_name: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            acquirer,
            credential,
            sites,
            list_name: list_name.into(),
        }
    }

    /// Resolve the role of `user_email` on `report_id`, or `None` if no row matches
    pub async fn resolve_role(&self, user_email: &str, report_id: &str) -> Result<Option<RoleName>> {
        let site_id = self.sites.site_id()?;
        let token = self.acquirer.acquire(&self.credential).await?;
        let items = self
            .directory
            .list_items(&token, site_id.as_str(), &self.list_name)
            .await?;

        debug!(rows = items.len(), "Fetched role assignment rows");
        let rows: Vec<RoleAssignmentRow> = items.into_iter().map(RoleAssignmentRow::from).collect();

        let role = match_role(&rows, user_email, report_id);
        match &role {
            Some(role) => info!(report_id = report_id, role = %role, "Matched role for user"),
            None => info!(report_id = report_id, "No role found for user on report"),
        }
        Ok(role)
    }
}
