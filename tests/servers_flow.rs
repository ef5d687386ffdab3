//! Integration tests for the server inventory endpoints using wiremock.
//!
//! These tests mock the Automox console to verify that the servers module
//! correctly constructs requests, sends the fixed header set and bearer
//! credential, decodes the console's non-standard scalars end to end, and
//! surfaces non-2xx responses as API errors:
//!
//! - GET /api/servers       — list_servers
//! - GET /api/servers/{id}  — get_server

use std::time::Duration;

use automox::client::AutomoxClient;
use automox::error::AutomoxError;
use automox::servers::{get_server, list_servers};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: creates a client pointed at the given wiremock server.
fn mock_client(server: &MockServer) -> AutomoxClient {
    AutomoxClient::builder("mock-token")
        .base_url(&server.uri())
        .build()
        .unwrap()
}

// ── list_servers ───────────────────────────────────────────────────────

#[tokio::test]
async fn list_servers_returns_devices() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("api/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 955,
                "name": "build-agent-03",
                "os_family": "Linux",
                "connected": true,
                "uptime": "912415",
                "create_time": "2022-07-21T10:10:06+0000"
            },
            {
                "id": 956,
                "name": "build-agent-04",
                "os_family": "Windows",
                "connected": false,
                "uptime": 7200,
                "create_time": null
            }
        ])))
        .mount(&server)
        .await;

    let servers = list_servers(&client).await.unwrap();

    assert_eq!(servers.len(), 2, "should return both devices");
    assert_eq!(servers[0].id, 955);
    assert_eq!(servers[0].name, "build-agent-03");
    assert_eq!(servers[0].uptime, 912_415, "quoted uptime should decode");
    assert!(servers[0].create_time.is_some());
    assert_eq!(servers[1].id, 956);
    assert_eq!(servers[1].name, "build-agent-04");
    assert_eq!(servers[1].uptime, 7200, "bare uptime should decode");
    assert!(servers[1].create_time.is_none());
}

#[tokio::test]
async fn list_servers_handles_empty_inventory() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("api/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let servers = list_servers(&client).await.unwrap();
    assert!(servers.is_empty());
}

#[tokio::test]
async fn requests_carry_bearer_and_fixed_headers() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    // The mock only matches when every expected header is present, so a
    // missing header surfaces as a 404 and fails the test.
    Mock::given(method("GET"))
        .and(path("api/servers"))
        .and(header("Authorization", "Bearer mock-token"))
        .and(header("Accept", "application/json"))
        // wiremock splits comma-delimited header values, so the expected
        // Cache-Control value is expressed through the multi-value matcher.
        .and(headers(
            "Cache-Control",
            vec![
                "no-store",
                "no-cache",
                "must-revalidate",
                "max-age=0",
                "post-check=0",
                "pre-check=0",
            ],
        ))
        .and(header(
            "Strict-Transport-Security",
            "max-age=31536000 ; includeSubDomains",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let result = list_servers(&client).await;
    assert!(
        result.is_ok(),
        "request should match all header expectations, got: {result:?}"
    );
}

// ── get_server ─────────────────────────────────────────────────────────

#[tokio::test]
async fn get_server_returns_single_device() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("api/servers/955"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 955,
            "uuid": "5f6ed461-74cf-4a4f-a6d2-8f9b4e2e4c0d",
            "name": "build-agent-03",
            "os_family": "Linux",
            "os_name": "Ubuntu",
            "os_version": "22.04",
            "compliant": true,
            "uptime": "912415",
            "detail": {
                "CPU": "Intel(R) Xeon(R) Gold 6230",
                "RAM": "8589934592",
                "VOLUME": [
                    {"LABEL": "/", "FSTYPE": "ext4", "IS_SYSTEM_DISK": "true"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let device = get_server(&client, 955).await.unwrap();

    assert_eq!(device.id, 955);
    assert_eq!(device.name, "build-agent-03");
    assert_eq!(device.os_name, "Ubuntu");
    assert!(device.compliant);
    assert_eq!(device.uptime, 912_415);
    assert_eq!(device.detail.cpu, "Intel(R) Xeon(R) Gold 6230");
    assert_eq!(device.detail.volume[0].label, "/");
}

#[tokio::test]
async fn get_server_not_found_surfaces_error_payload() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("api/servers/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": ["not found"]
        })))
        .mount(&server)
        .await;

    let result = get_server(&client, 999).await;

    match result {
        Err(AutomoxError::Api { status, errors }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(errors, vec!["not found"]);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_error_shaped_failure_body_is_preserved() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    // Failure bodies that do not match {"errors": [...]} (e.g. from a
    // proxy in front of the console) survive as the single message.
    Mock::given(method("GET"))
        .and(path("api/servers/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = get_server(&client, 1).await;

    match result {
        Err(AutomoxError::Api { status, errors }) => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(errors, vec!["bad gateway"]);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("api/servers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = get_server(&client, 1).await;
    assert!(
        matches!(result, Err(AutomoxError::Decode(_))),
        "a 2xx body that is not JSON must surface as Decode, got: {result:?}"
    );
}

// ── Cancellation ───────────────────────────────────────────────────────

#[tokio::test]
async fn cancellation_token_aborts_in_flight_request() {
    let server = MockServer::start().await;

    // The mock delays long enough that the request cannot win the race
    // against an already-cancelled token.
    Mock::given(method("GET"))
        .and(path("api/servers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let client = AutomoxClient::builder("mock-token")
        .base_url(&server.uri())
        .cancellation(token.clone())
        .build()
        .unwrap();

    token.cancel();

    let result = list_servers(&client).await;
    assert!(
        matches!(result, Err(AutomoxError::Cancelled)),
        "cancelled token must abort the request, got: {result:?}"
    );
}

// ── Raw responses ──────────────────────────────────────────────────────

#[tokio::test]
async fn send_returns_the_undecoded_success_response() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let body = r#"[{"id": 955, "name": "build-agent-03"}]"#;
    Mock::given(method("GET"))
        .and(path("api/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let response = client.send("api/servers").await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        body,
        "the 2xx body must come back untouched"
    );
}
