//! End-to-end tests of `GET /api/embed-info`

use crate::common::upstream::{SITE_ID, SITE_NAME};
use crate::common::{RoleRowFactory, TestUpstream, call, embed_uri};
use serde_json::json;

#[actix_web::test]
async fn test_rls_request_binds_resolved_role() {
    let upstream = TestUpstream::start().await;
    upstream.mount_tokens().await;
    upstream
        .mount_role_rows(json!([RoleRowFactory::record(1, "Viewer", "R7", "bob@co.com")]), 1)
        .await;
    upstream.mount_report("W1", "R7", "https://embed/x", 1).await;
    upstream
        .mount_generate_token(
            Some(json!({
                "datasets": [{"id": "D1"}],
                "reports": [{"id": "R7"}],
                "targetWorkspaces": [{"id": "W1"}],
                "accessLevel": "view",
                "identities": [{
                    "username": "bob@co.com",
                    "roles": ["Viewer"],
                    "datasets": ["D1"]
                }]
            })),
            "tok123",
            1,
        )
        .await;
    let state = upstream.ready_state().await;

    let (status, body) = call(
        &state,
        &embed_uri("bob@co.com", "R7", "D1", "W1", "W1", Some("yes")),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "embedUrl": "https://embed/x",
            "embedToken": "tok123",
            "reportId": "R7",
            "usedRoles": ["Viewer"]
        })
    );
}

#[actix_web::test]
async fn test_rls_request_without_role_is_rejected_before_token() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token("sp-client", "graph-token", None).await;
    upstream.mount_token("pbi-client", "pbi-token", Some(0)).await;
    upstream
        .mount_role_rows(
            json!([
                RoleRowFactory::record(1, "Viewer", "R8", "bob@co.com"),
                RoleRowFactory::record(2, "Viewer", "R7", "alice@co.com")
            ]),
            1,
        )
        .await;
    upstream.mount_report("W1", "R7", "https://embed/x", 0).await;
    upstream.mount_generate_token(None, "tok123", 0).await;
    let state = upstream.ready_state().await;

    let (status, body) = call(
        &state,
        &embed_uri("bob@co.com", "R7", "D1", "W1", "W1", Some("yes")),
    )
    .await;

    assert_eq!(status, 403);
    assert_eq!(
        body,
        json!({"error": "User not authorized in SharePoint Security List"})
    );
}

#[actix_web::test]
async fn test_rls_disabled_skips_directory_and_identity() {
    let upstream = TestUpstream::start().await;
    upstream.mount_tokens().await;
    upstream.mount_role_rows(json!([]), 0).await;
    upstream.mount_report("W1", "R7", "https://embed/x", 1).await;
    upstream
        .mount_generate_token(
            Some(json!({
                "datasets": [{"id": "D1"}],
                "reports": [{"id": "R7"}],
                "targetWorkspaces": [{"id": "W1"}, {"id": "W2"}],
                "accessLevel": "view"
            })),
            "tok456",
            1,
        )
        .await;
    let state = upstream.ready_state().await;

    let (status, body) = call(
        &state,
        &embed_uri("bob@co.com", "R7", "D1", "W1", "W2", Some("no")),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["embedToken"], "tok456");
    assert_eq!(body["usedRoles"], json!([]));
}

#[actix_web::test]
async fn test_missing_parameters_make_no_upstream_calls() {
    let upstream = TestUpstream::start().await;
    let state = upstream.state().await;

    // Registered after startup so only request-time calls are counted
    upstream.mount_token("sp-client", "graph-token", Some(0)).await;
    upstream.mount_token("pbi-client", "pbi-token", Some(0)).await;
    upstream.mount_role_rows(json!([]), 0).await;
    upstream.mount_generate_token(None, "tok", 0).await;

    let uris = [
        "/api/embed-info",
        "/api/embed-info?userEmail=bob@co.com&reportId=R7&datasetId=D1&reportWorkspaceId=W1&hasRLS=yes",
        "/api/embed-info?userEmail=&reportId=R7&datasetId=D1&reportWorkspaceId=W1&datasetWorkspaceId=W1",
    ];
    for uri in uris {
        let (status, body) = call(&state, uri).await;
        assert_eq!(status, 400, "{}", uri);
        assert_eq!(body, json!({"error": "Missing required query parameters"}));
    }
}

#[actix_web::test]
async fn test_report_hosting_failure_surfaces_payload() {
    let upstream = TestUpstream::start().await;
    upstream.mount_tokens().await;
    upstream.mount_report("W1", "R7", "https://embed/x", 1).await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/pbi/GenerateToken"))
        .respond_with(wiremock::ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "InvalidRequest",
                "message": "Creating embed token for accessing dataset D1 requires effective identity"
            }
        })))
        .expect(1)
        .mount(&upstream.server)
        .await;
    let state = upstream.ready_state().await;

    let (status, body) = call(&state, &embed_uri("bob@co.com", "R7", "D1", "W1", "W1", None)).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to generate Power BI Embed Token");
    assert_eq!(body["details"]["code"], "InvalidRequest");
}

#[actix_web::test]
async fn test_unresolved_site_fails_rls_but_not_plain_embeds() {
    let upstream = TestUpstream::start().await;
    upstream.mount_tokens().await;
    upstream.mount_site_search(json!([])).await;
    upstream.mount_role_rows(json!([]), 0).await;
    upstream.mount_report("W1", "R7", "https://embed/x", 1).await;
    upstream.mount_generate_token(None, "tok789", 1).await;
    let state = upstream.state().await;
    assert!(!state.sites.is_ready());

    let (status, body) = call(&state, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "degraded");

    let (status, body) = call(
        &state,
        &embed_uri("bob@co.com", "R7", "D1", "W1", "W1", Some("yes")),
    )
    .await;
    assert_eq!(status, 500);
    assert!(
        body["details"]
            .as_str()
            .unwrap_or_default()
            .contains(SITE_NAME)
    );

    let (status, body) = call(&state, &embed_uri("bob@co.com", "R7", "D1", "W1", "W1", None)).await;
    assert_eq!(status, 200);
    assert_eq!(body["embedToken"], "tok789");
}

#[actix_web::test]
async fn test_repeated_requests_are_structurally_identical() {
    let upstream = TestUpstream::start().await;
    upstream.mount_tokens().await;
    upstream
        .mount_role_rows(
            json!([RoleRowFactory::bare(1, "Manager", "R1", "Alice@Example.com ")]),
            2,
        )
        .await;
    upstream.mount_report("W1", "R1", "https://embed/r1", 2).await;
    upstream.mount_generate_token(None, "tok-r1", 2).await;
    let state = upstream.ready_state().await;
    assert_eq!(state.sites.site_id().map(|id| id.to_string()).ok().as_deref(), Some(SITE_ID));

    let uri = embed_uri("alice@example.com", "R1", "D1", "W1", "W1", Some("yes"));
    let first = call(&state, &uri).await;
    let second = call(&state, &uri).await;

    assert_eq!(first.0, 200);
    assert_eq!(first, second);
    assert_eq!(first.1["usedRoles"], json!(["Manager"]));
}
