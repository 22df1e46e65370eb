//! Directory service HTTP client

use crate::core::auth::AccessToken;
use crate::core::upstream::{authorized, join_segments, parse_base_url, send_json};
use crate::utils::error::{Result, UpstreamService};
use serde::Deserialize;
use url::Url;

/// Fields projected from each list item
const LIST_ITEM_EXPAND: &str = "fields($select=Title,ReportId,User)";
const LIST_ITEM_SELECT: &str = "id,fields";

/// Collection envelope used by the directory API
#[derive(Debug, Deserialize)]
struct Collection<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

/// A site returned by site search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Raw column values of a role-assignment list item.
///
/// Values are kept untyped; `User` in particular may be a single value, an
/// array, or absent depending on how the column is configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleAssignmentFields {
    #[serde(rename = "Title", default)]
    pub title: serde_json::Value,
    #[serde(rename = "ReportId", default)]
    pub report_id: serde_json::Value,
    #[serde(rename = "User", default)]
    pub user: serde_json::Value,
}

/// A role-assignment list item
#[derive(Debug, Clone, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: RoleAssignmentFields,
}

/// Client for the directory service's site and list endpoints
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl DirectoryClient {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Search sites by display name
    pub async fn search_sites(&self, token: &AccessToken, name: &str) -> Result<Vec<SiteRecord>> {
        let mut url = join_segments(&self.base_url, &["sites"]);
        url.query_pairs_mut()
            .append_pair("search", &format!("\"{}\"", name));

        let request = authorized(self.http_client.get(url), token);
        let sites: Collection<SiteRecord> = send_json(UpstreamService::Directory, request).await?;
        Ok(sites.value)
    }

    /// Fetch the first page of items of a list.
    ///
    /// Pagination links are ignored; the list is expected to fit in one page.
    pub async fn list_items(
        &self,
        token: &AccessToken,
        site_id: &str,
        list_name: &str,
    ) -> Result<Vec<ListItem>> {
        let mut url = join_segments(
            &self.base_url,
            &["sites", site_id, "lists", list_name, "items"],
        );
        url.query_pairs_mut()
            .append_pair("$expand", LIST_ITEM_EXPAND)
            .append_pair("$select", LIST_ITEM_SELECT);

        let request = authorized(self.http_client.get(url), token);
        let items: Collection<ListItem> = send_json(UpstreamService::Directory, request).await?;
        Ok(items.value)
    }
}
