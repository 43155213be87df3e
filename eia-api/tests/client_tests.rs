use std::time::Duration;

use eia_api::{Configuration, EiaClient, EiaError, MetadataCache};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "test-key-123";

fn client_for(server: &MockServer) -> EiaClient {
    let config = Configuration::new()
        .with_base_url(server.uri())
        .with_api_key(TEST_KEY)
        .with_timeout(5);
    EiaClient::with_config(config).expect("client should build")
}

#[tokio::test]
async fn missing_credential_fails_before_any_network_io() {
    let server = MockServer::start().await;
    // No mock is mounted and none is expected to be hit.
    let config = Configuration::new().with_base_url(server.uri());
    let client = EiaClient::with_config(config).expect("client should build");

    let result = client.request("electricity", &[]).await;
    assert!(matches!(result, Err(EiaError::MissingCredential)));
    assert!(server.received_requests().await.expect("requests").is_empty());
}

#[tokio::test]
async fn successful_requests_return_the_parsed_body() {
    let server = MockServer::start().await;
    let body = json!({"response": {"routes": [{"id": "electricity"}]}});
    Mock::given(method("GET"))
        .and(path("/electricity"))
        .and(query_param("api_key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // Extra slashes on the route collapse to a single separator.
    let result = client.request("/electricity/", &[]).await.expect("success");
    assert_eq!(result, body);
}

#[tokio::test]
async fn http_errors_keep_the_upstream_error_body_as_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/electricity/retail-sales/data"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "invalid api_key"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .request("electricity/retail-sales/data", &[])
        .await
        .expect_err("should fail");

    match &err {
        EiaError::HttpStatus {
            status,
            text,
            details,
        } => {
            assert_eq!(*status, 403);
            assert!(text.contains("invalid api_key"));
            assert_eq!(
                details.as_ref().and_then(|d| d.get("error")),
                Some(&json!("invalid api_key"))
            );
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }

    // The configured credential must never leak into the error text.
    let rendered = err.to_string();
    assert!(rendered.contains("invalid api_key"));
    assert!(!rendered.contains(TEST_KEY));
}

#[tokio::test]
async fn non_json_error_bodies_are_carried_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/petroleum"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway at the upstream"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.request("petroleum", &[]).await {
        Err(EiaError::HttpStatus {
            status,
            text,
            details,
        }) => {
            assert_eq!(status, 502);
            assert!(text.contains("bad gateway"));
            assert!(details.is_none());
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_success_bodies_are_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coal"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.request("coal", &[]).await,
        Err(EiaError::Malformed(_))
    ));
}

#[tokio::test]
async fn query_parameters_are_forwarded_alongside_the_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/electricity/retail-sales/data"))
        .and(query_param("facets[stateid][]", "CO"))
        .and(query_param("frequency", "M"))
        .and(query_param("api_key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {"data": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = vec![
        ("frequency".to_string(), "M".to_string()),
        ("facets[stateid][]".to_string(), "CO".to_string()),
    ];
    client
        .request("electricity/retail-sales/data", &params)
        .await
        .expect("success");
}

#[tokio::test]
async fn cache_serves_repeat_lookups_within_the_ttl() {
    let server = MockServer::start().await;
    let body = json!({"id": "electricity", "name": "Electricity"});
    Mock::given(method("GET"))
        .and(path("/electricity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cache = MetadataCache::new();

    let first = cache
        .get_or_fetch(&client, "electricity", &[])
        .await
        .expect("first fetch");
    let second = cache
        .get_or_fetch(&client, "electricity", &[])
        .await
        .expect("second fetch");

    assert_eq!(first, second);
    assert_eq!(server.received_requests().await.expect("requests").len(), 1);
}

#[tokio::test]
async fn cache_refetches_after_the_ttl_expires() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/electricity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "electricity"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cache = MetadataCache::with_ttl(Duration::from_millis(50));

    cache
        .get_or_fetch(&client, "electricity", &[])
        .await
        .expect("first fetch");
    tokio::time::sleep(Duration::from_millis(80)).await;
    cache
        .get_or_fetch(&client, "electricity", &[])
        .await
        .expect("refetch");

    assert_eq!(server.received_requests().await.expect("requests").len(), 2);
}

#[tokio::test]
async fn cache_does_not_store_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cache = MetadataCache::new();

    assert!(cache.get_or_fetch(&client, "broken", &[]).await.is_err());
    assert!(cache.get_or_fetch(&client, "broken", &[]).await.is_err());
    assert_eq!(server.received_requests().await.expect("requests").len(), 2);
}

#[test]
fn cache_keys_are_canonical_across_parameter_order() {
    let a = vec![
        ("frequency".to_string(), "M".to_string()),
        ("start".to_string(), "2024".to_string()),
    ];
    let b = vec![
        ("start".to_string(), "2024".to_string()),
        ("frequency".to_string(), "M".to_string()),
    ];
    assert_eq!(
        MetadataCache::cache_key("electricity", &a),
        MetadataCache::cache_key("/electricity/", &b)
    );
}
