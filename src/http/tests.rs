//! Tests for the HTTP transport module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::types::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    HttpClient::new(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("getresponse-connector/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.getresponse.com/v3")
        .timeout(Duration::from_secs(60))
        .header("X-Domain", "example.com")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://api.getresponse.com/v3".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Domain"),
        Some(&"example.com".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_query_replaces_key() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("perPage", "100")
        .query("page", "2");

    assert_eq!(
        config.query,
        vec![
            ("page".to_string(), "2".to_string()),
            ("perPage".to_string(), "100".to_string()),
        ]
    );
    assert_eq!(config.query_value("page"), Some("2"));
    assert_eq!(config.query_value("missing"), None);
}

#[tokio::test]
async fn test_get_decodes_json_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("TotalPages", "3")
                .set_body_json(json!([{"contactId": "a"}])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client.get("/contacts", RequestConfig::new()).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!([{"contactId": "a"}]));
    assert_eq!(response.header_u32("TotalPages"), Some(3));
    assert_eq!(response.header_u32("CurrentPage"), None);
}

#[tokio::test]
async fn test_empty_body_decodes_to_null() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contacts"))
        .and(body_json(json!({"email": "a@b.c"})))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .request(
            Method::POST,
            "/contacts",
            RequestConfig::new().json(json!({"email": "a@b.c"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 202);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_non_json_body_kept_as_text() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/contacts/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .request(Method::DELETE, "/contacts/abc", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(response.body, json!("deleted"));
}

#[tokio::test]
async fn test_query_params_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("query[email]", "x@y.z"))
        .and(query_param("sort[email]", "DESC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .get(
            "/contacts",
            RequestConfig::new()
                .query("query[email]", "x@y.z")
                .query("sort[email]", "DESC"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_api_key_and_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .and(header("X-Auth-Token", "api-key secret123"))
        .and(header("X-Domain", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .header("X-Domain", "example.com")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_auth(
        config,
        AuthConfig::ApiKey {
            api_key: "secret123".to_string(),
        },
    )
    .unwrap();

    client.get("/campaigns", RequestConfig::new()).await.unwrap();
}

#[tokio::test]
async fn test_404_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get("/contacts/missing", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, ref body } if body == "Not found"));
}

#[tokio::test]
async fn test_server_error_sent_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get("/tags", RequestConfig::new()).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, ref body } if body == "down"));
}

#[tokio::test]
async fn test_post_not_resent_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .request(
            Method::POST,
            "/contacts",
            RequestConfig::new().json(json!({"email": "a@b.c"})),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_rate_limited_reports_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get("/tags", RequestConfig::new()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 7
        }
    ));
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!([])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get(
            "/campaigns",
            RequestConfig::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[test]
fn test_http_client_debug_hides_credentials() {
    let client = HttpClient::with_auth(
        HttpClientConfig::default(),
        AuthConfig::OAuth2 {
            access_token: "tok-secret".to_string(),
        },
    )
    .unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("oauth2"));
    assert!(!debug_str.contains("tok-secret"));
    assert!(client.has_rate_limiter());
}
