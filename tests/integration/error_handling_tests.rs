//! Error handling integration tests
//!
//! Verifies that every failure kind maps to the documented response shape.

use actix_web::ResponseError;
use embed_broker::BrokerError;
use embed_broker::utils::error::UpstreamService;
use serde_json::json;

#[test]
fn test_only_validation_and_denial_are_client_errors() {
    let cases = [
        (BrokerError::validation("missing reportId"), 400),
        (BrokerError::authorization_denied("no role"), 403),
        (BrokerError::auth("client", "invalid_client"), 500),
        (
            BrokerError::upstream(UpstreamService::Directory, Some(503), json!("unavailable")),
            500,
        ),
        (BrokerError::transport(UpstreamService::ReportHosting, "timed out"), 500),
        (BrokerError::SiteNotFound("PowerBiConfiguration".to_string()), 500),
        (BrokerError::SiteNotReady("pending".to_string()), 500),
        (BrokerError::config("bad"), 500),
    ];

    for (error, expected) in cases {
        assert_eq!(error.error_response().status().as_u16(), expected, "{}", error);
    }
}

#[test]
fn test_string_payload_passed_through() {
    let error = BrokerError::upstream(
        UpstreamService::ReportHosting,
        Some(502),
        json!("<html>Bad Gateway</html>"),
    );
    assert_eq!(error.details(), json!("<html>Bad Gateway</html>"));
}
