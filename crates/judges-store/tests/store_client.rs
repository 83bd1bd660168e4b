//! Integration tests for StoreClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover all six operations, header
//! and body wire shapes (metadata encoding, gzip, content types), and the
//! failure taxonomy (protocol errors with status+body, timeouts).

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use judges_store::{StoreClient, StoreConfig, StoreError, STORE_USER_AGENT};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn create_test_client(server: &MockServer, compress: bool) -> StoreClient {
    let address = server.address();
    let config = StoreConfig::new(address.ip().to_string(), address.port(), "000")
        .with_secure(false)
        .with_compress(compress);
    StoreClient::new(config).expect("failed to create client")
}

/// Matches when the named header is absent from the request.
struct HeaderAbsent(&'static str);

impl Match for HeaderAbsent {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key(self.0)
    }
}

/// Matches when the request body gunzips to exactly the given bytes.
struct GzipBody(Vec<u8>);

impl Match for GzipBody {
    fn matches(&self, request: &Request) -> bool {
        let mut decoder = GzDecoder::new(&request.body[..]);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).is_ok() && out == self.0
    }
}

#[tokio::test]
async fn push_returns_assigned_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/push/simple"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_string("hello, world!"))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, false);
    let id = client
        .push("simple", b"hello, world!", &[] as &[&str])
        .await
        .expect("push failed");

    assert_eq!(id, 42);
}

#[tokio::test]
async fn push_encodes_meta_entries_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/push/simple"))
        .and(header("x-zerocracy-meta", "Ym9vbSE= 0YXQtdC5IQ=="))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, false);
    let id = client
        .push("simple", b"hello, world!", &["boom!", "хей!"])
        .await
        .expect("push failed");

    assert_eq!(id, 42);
}

#[tokio::test]
async fn push_omits_meta_header_when_list_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/push/simple"))
        .and(HeaderAbsent("x-zerocracy-meta"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, false);
    client
        .push("simple", b"hello, world!", &[] as &[&str])
        .await
        .expect("push failed");
}

#[tokio::test]
async fn push_compresses_payload_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/push/simple"))
        .and(header("content-type", "application/zip"))
        .and(header("content-encoding", "gzip"))
        .and(GzipBody(b"hello, world!".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let id = client
        .push("simple", b"hello, world!", &["meta1", "meta2", "meta3"])
        .await
        .expect("push failed");

    assert_eq!(id, 42);
}

#[tokio::test]
async fn push_non_numeric_body_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/push/simple"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not-a-number"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, false);
    let result = client.push("simple", b"hello", &[] as &[&str]).await;

    match result {
        Err(StoreError::Protocol { status, body }) => {
            assert_eq!(status, 200);
            assert_eq!(body, "not-a-number");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn push_server_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/push/simple"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, false);
    let result = client.push("simple", b"hello", &[] as &[&str]).await;

    match result {
        Err(StoreError::Protocol { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn pull_returns_verbatim_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pull/333.fb"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello, world!"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let payload = client.pull(333).await.expect("pull failed");

    assert!(payload.starts_with(b"hello"));
}

#[tokio::test]
async fn pull_not_found_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pull/404.fb"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such artifact"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let result = client.pull(404).await;

    assert!(matches!(
        result,
        Err(StoreError::Protocol { status: 404, .. })
    ));
}

#[tokio::test]
async fn recent_returns_id_and_identifies_itself() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recent/simple.txt"))
        .and(header("user-agent", STORE_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let id = client.recent("simple").await.expect("recent failed");

    assert_eq!(id, 42);
}

#[tokio::test]
async fn recent_garbage_body_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recent/simple.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("whatever"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let result = client.recent("simple").await;

    assert!(matches!(result, Err(StoreError::Protocol { .. })));
}

#[tokio::test]
async fn exists_interprets_yes_and_no() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exists/known"))
        .respond_with(ResponseTemplate::new(200).set_body_string("yes"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exists/unknown"))
        .respond_with(ResponseTemplate::new(200).set_body_string("no"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    assert!(client.exists("known").await.expect("exists failed"));
    assert!(!client.exists("unknown").await.expect("exists failed"));
}

#[tokio::test]
async fn exists_failure_is_an_error_not_false() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exists/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let result = client.exists("broken").await;

    assert!(matches!(
        result,
        Err(StoreError::Protocol { status: 500, .. })
    ));
}

#[tokio::test]
async fn exit_code_parses_integer_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exit/42.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let code = client.exit_code(42).await.expect("exit_code failed");

    assert_eq!(code, 0);
}

#[tokio::test]
async fn stdout_returns_verbatim_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stdout/42.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello!"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, true);
    let text = client.stdout(42).await.expect("stdout failed");

    assert_eq!(text, "hello!");
}

#[tokio::test]
async fn token_travels_on_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exists/simple"))
        .and(header("x-zerocracy-token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("yes"))
        .expect(1)
        .mount(&server)
        .await;

    let address = server.address();
    let config = StoreConfig::new(address.ip().to_string(), address.port(), "secret-token")
        .with_secure(false);
    let client = StoreClient::new(config).expect("failed to create client");

    assert!(client.exists("simple").await.expect("exists failed"));
}

#[tokio::test]
async fn slow_store_surfaces_a_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recent/slow.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("42")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let address = server.address();
    let config = StoreConfig::new(address.ip().to_string(), address.port(), "000")
        .with_secure(false)
        .with_timeout(1);
    let client = StoreClient::new(config).expect("failed to create client");

    let result = client.recent("slow").await;
    assert!(matches!(result, Err(StoreError::Transport { .. })));
}
