//! Test fixtures and data factories

use serde_json::{Value, json};

/// Factory for role-assignment list items as the directory returns them
pub struct RoleRowFactory;

impl RoleRowFactory {
    /// A row whose `User` column is a bare value
    pub fn bare(id: u32, title: &str, report_id: &str, user: &str) -> Value {
        Self::with_user(id, title, report_id, json!(user))
    }

    /// A row whose `User` column is a single identity record
    pub fn record(id: u32, title: &str, report_id: &str, email: &str) -> Value {
        Self::with_user(id, title, report_id, json!({"Email": email}))
    }

    /// A row with an arbitrary `User` column
    pub fn with_user(id: u32, title: &str, report_id: &str, user: Value) -> Value {
        json!({
            "id": id.to_string(),
            "fields": {
                "@odata.etag": "\"etag\"",
                "Title": title,
                "ReportId": report_id,
                "User": user
            }
        })
    }
}

/// Build an embed-info URI from the identifying fields
pub fn embed_uri(
    user_email: &str,
    report_id: &str,
    dataset_id: &str,
    report_workspace_id: &str,
    dataset_workspace_id: &str,
    has_rls: Option<&str>,
) -> String {
    let mut uri = format!(
        "/api/embed-info?userEmail={}&reportId={}&datasetId={}&reportWorkspaceId={}&datasetWorkspaceId={}",
        user_email, report_id, dataset_id, report_workspace_id, dataset_workspace_id
    );
    if let Some(flag) = has_rls {
        uri.push_str(&format!("&hasRLS={}", flag));
    }
    uri
}
