//! Stubbed upstream services
//!
//! One `wiremock` server plays all three upstreams under different path
//! prefixes: `/authority`, `/graph` and `/pbi`.

use actix_web::{App, test, web};
use embed_broker::Config;
use embed_broker::server::{AppState, routes};
use serde_json::{Value, json};
use std::collections::HashMap;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TENANT: &str = "tenant-1";
pub const SITE_NAME: &str = "PowerBiConfiguration";
pub const LIST_NAME: &str = "PowerBISecurityRoles";
pub const SITE_ID: &str = "site-1";
pub const GRAPH_TOKEN: &str = "graph-token";
pub const PBI_TOKEN: &str = "pbi-token";

/// Stub server plus helpers to mount each upstream contract
pub struct TestUpstream {
    pub server: MockServer,
}

impl TestUpstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Broker configuration pointing at the stub server
    pub fn config(&self) -> Config {
        let uri = self.server.uri();
        let env: HashMap<&str, String> = HashMap::from([
            ("TENANT_ID", TENANT.to_string()),
            ("SP_APP_ID", "sp-client".to_string()),
            ("SP_APP_SECRET", "sp-secret".to_string()),
            ("PBI_APP_ID", "pbi-client".to_string()),
            ("PBI_APP_SECRET", "pbi-secret".to_string()),
            ("AUTHORITY_HOST", format!("{}/authority", uri)),
            ("GRAPH_BASE_URL", format!("{}/graph", uri)),
            ("POWERBI_BASE_URL", format!("{}/pbi", uri)),
            ("UPSTREAM_TIMEOUT_SECS", "5".to_string()),
        ]);
        match Config::from_lookup(|key| env.get(key).cloned()) {
            Ok(config) => config,
            Err(e) => panic!("test configuration rejected: {}", e),
        }
    }

    pub fn token_path() -> String {
        format!("/authority/{}/oauth2/v2.0/token", TENANT)
    }

    /// Token endpoint for both principals, any number of calls
    pub async fn mount_tokens(&self) {
        self.mount_token("sp-client", GRAPH_TOKEN, None).await;
        self.mount_token("pbi-client", PBI_TOKEN, None).await;
    }

    pub async fn mount_token(&self, client_id: &str, access_token: &str, expect: Option<u64>) {
        let mock = Mock::given(method("POST"))
            .and(path(Self::token_path()))
            .and(body_string_contains(format!("client_id={}", client_id)))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": access_token
            })));
        match expect {
            Some(n) => mock.expect(n).mount(&self.server).await,
            None => mock.mount(&self.server).await,
        }
    }

    /// Site search returning the given sites
    pub async fn mount_site_search(&self, sites: Value) {
        Mock::given(method("GET"))
            .and(path("/graph/sites"))
            .and(query_param("search", format!("\"{}\"", SITE_NAME)))
            .and(header("authorization", format!("Bearer {}", GRAPH_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": sites })))
            .mount(&self.server)
            .await;
    }

    pub fn list_items_path() -> String {
        format!("/graph/sites/{}/lists/{}/items", SITE_ID, LIST_NAME)
    }

    /// Role-assignment list returning the given rows
    pub async fn mount_role_rows(&self, rows: Value, expect: u64) {
        Mock::given(method("GET"))
            .and(path(Self::list_items_path()))
            .and(query_param("$expand", "fields($select=Title,ReportId,User)"))
            .and(header("authorization", format!("Bearer {}", GRAPH_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": rows })))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    /// Report metadata lookup
    pub async fn mount_report(&self, workspace_id: &str, report_id: &str, embed_url: &str, expect: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/pbi/groups/{}/reports/{}", workspace_id, report_id)))
            .and(header("authorization", format!("Bearer {}", PBI_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": report_id,
                "name": "Sales",
                "embedUrl": embed_url,
                "datasetId": "D1"
            })))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    /// Token generation; when `expected_body` is given the request must match it exactly
    pub async fn mount_generate_token(&self, expected_body: Option<Value>, token: &str, expect: u64) {
        let mut mock = Mock::given(method("POST"))
            .and(path("/pbi/GenerateToken"))
            .and(header("authorization", format!("Bearer {}", PBI_TOKEN).as_str()));
        if let Some(body) = expected_body {
            mock = mock.and(body_json(body));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "tokenId": "00000000-0000-0000-0000-000000000000",
            "expiration": "2030-01-01T00:00:00Z"
        })))
        .expect(expect)
        .mount(&self.server)
        .await;
    }

    /// State wired to the stub server with the site already resolved
    pub async fn ready_state(&self) -> AppState {
        self.mount_site_search(json!([{ "id": SITE_ID, "displayName": SITE_NAME }]))
            .await;
        self.state().await
    }

    /// State wired to the stub server after running site initialization
    pub async fn state(&self) -> AppState {
        let (state, resolver) = match AppState::from_config(self.config()) {
            Ok(wired) => wired,
            Err(e) => panic!("failed to wire state: {}", e),
        };
        resolver.initialize(&state.sites).await;
        state
    }
}

/// Issue a GET against the broker's routes
pub async fn call(state: &AppState, uri: &str) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure_routes),
    )
    .await;
    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status().as_u16();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}
