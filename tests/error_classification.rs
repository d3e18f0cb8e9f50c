//! Wire-level error classification tests.
//!
//! The classifier's decision tree is unit-tested in `src/error.rs`; these
//! tests check that real HTTP error responses flow through it and that
//! transport failures stay distinct from classified API errors.

use serde_json::json;
use soracom::{Credentials, Get, SoracomClient, SoracomError, Subscriber};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> SoracomClient {
    SoracomClient::new(&server.uri())
        .unwrap()
        .with_credentials(Credentials::new("k", "t", "OP1"))
}

async fn classify_get(server: &MockServer) -> soracom::ApiError {
    let client = test_client(server);
    let err = Subscriber::get(&client, "440103000000001".to_string())
        .await
        .expect_err("expected an error");
    match err {
        SoracomError::Api(api) => api,
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_404_is_unk0001() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscribers/440103000000001"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("no such imsi", "text/plain"))
        .mount(&server)
        .await;

    let api = classify_get(&server).await;
    assert_eq!(api.status, 404);
    assert_eq!(api.code, "UNK0001");
    assert_eq!(api.message, "no such imsi");
}

#[tokio::test]
async fn test_structured_json_404_carries_code_and_interpolated_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscribers/440103000000001"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "SEM0095",
            "message": "subscriber %s not found",
            "messageArgs": "440103000000001"
        })))
        .mount(&server)
        .await;

    let api = classify_get(&server).await;
    assert_eq!(api.code, "SEM0095");
    assert_eq!(api.message, "subscriber 440103000000001 not found");
}

#[tokio::test]
async fn test_json_500_has_empty_code_and_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscribers/440103000000001"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = classify_get(&server).await;
    assert_eq!(api.status, 500);
    assert_eq!(api.code, "");
    assert_eq!(api.message, "{}");
}

#[tokio::test]
async fn test_unsupported_content_type_is_int0001() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscribers/440103000000001"))
        .respond_with(
            ResponseTemplate::new(415).set_body_raw(vec![0u8; 4], "application/pdf"),
        )
        .mount(&server)
        .await;

    let api = classify_get(&server).await;
    assert_eq!(api.code, "INT0001");
    assert_eq!(api.message, "Content-Type: application/pdf is not supported");
}

#[tokio::test]
async fn test_malformed_json_error_payload_still_classifies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscribers/440103000000001"))
        .respond_with(ResponseTemplate::new(400).set_body_raw("{broken", "application/json"))
        .mount(&server)
        .await;

    let api = classify_get(&server).await;
    assert_eq!(api.status, 400);
    assert_eq!(api.code, "");
    assert_eq!(api.message, "");
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    // Take the server down and keep its address. A bare (non-pooled) server
    // is required here: pooled servers from `MockServer::start` keep their
    // listener alive after drop, so the port would still accept connections.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = SoracomClient::new(&uri).unwrap();
    let err = Subscriber::get(&client, "440103000000001".to_string())
        .await
        .expect_err("expected an error");

    assert!(matches!(err, SoracomError::Transport(_)));
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscribers/440103000000001"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = Subscriber::get(&client, "440103000000001".to_string())
        .await
        .expect_err("expected an error");

    // Success-path decode failures are surfaced, not silently zeroed.
    assert!(matches!(err, SoracomError::Decode(_)));
}
