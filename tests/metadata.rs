//! Metadata Service client tests.
//!
//! The Metadata Service identifies callers by source IP, so requests carry
//! no credential headers and no IMSI path segments.

use serde_json::json;
use soracom::MetadataClient;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_own_subscriber_without_credential_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/subscriber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "imsi": "440103000000001",
            "status": "active",
            "speedClass": "s1.minimum"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();
    let subscriber = client.subscriber().await.expect("get failed");
    assert_eq!(subscriber.imsi, "440103000000001");

    // The server never saw a credential header.
    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| !r.headers.contains_key("X-Soracom-API-Key")));
}

#[tokio::test]
async fn test_update_own_speed_class() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/subscriber/update_speed_class"))
        .and(body_json(json!({"speedClass": "s1.fast"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "imsi": "440103000000001",
            "speedClass": "s1.fast"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();
    let subscriber = client
        .update_speed_class("s1.fast")
        .await
        .expect("update failed");
    assert_eq!(subscriber.speed_class, "s1.fast");
}

#[tokio::test]
async fn test_userdata_is_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/userdata"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("bootstrap-config-v2\n", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();
    let userdata = client.userdata().await.expect("userdata failed");
    assert_eq!(userdata, "bootstrap-config-v2\n");
}

#[tokio::test]
async fn test_delete_own_tag_percent_encodes() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/subscriber/tags/rack%20id"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();
    client.delete_tag("rack id").await.expect("delete failed");
}

#[tokio::test]
async fn test_metadata_errors_are_classified_like_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/subscriber"))
        .respond_with(
            ResponseTemplate::new(403).set_body_raw("not a soracom connection", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();
    let err = client.subscriber().await.expect_err("expected an error");
    match err {
        soracom::SoracomError::Api(api) => {
            assert_eq!(api.status, 403);
            assert_eq!(api.code, "UNK0001");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
