//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → node parameters → HTTP requests → output items

use getresponse_connector::{
    load_config_from_str, Error, GetResponseNode, NodeDescription, ParameterSet,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_yaml(server: &MockServer, extra: &str) -> String {
    format!(
        r#"
base_url: "{}"
auth:
  type: api_key
  api_key: integration-key
http:
  rate_limit: null
timezone: America/New_York
{extra}
"#,
        server.uri()
    )
}

fn node(server: &MockServer, extra: &str) -> GetResponseNode {
    let config = load_config_from_str(&config_yaml(server, extra)).unwrap();
    GetResponseNode::from_config(&config).unwrap()
}

// ============================================================================
// Contact Lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_then_get_contact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contacts"))
        .and(header("X-Auth-Token", "api-key integration-key"))
        .and(body_json(json!({
            "email": "ann@example.com",
            "campaign": {"campaignId": "V"},
            "name": "Ann",
            "tags": [{"tagId": "t1"}],
            "customFieldValues": [
                {"customFieldId": "a", "value": ["red"]},
                {"customFieldId": "b", "value": ["x", "y"]}
            ]
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contacts/c1"))
        .and(query_param("fields", "name,email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contactId": "c1",
            "name": "Ann",
            "email": "ann@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let node = node(&server, "");

    let create = ParameterSet::from_json(
        r#"{
            "parameters": {
                "operation": "create",
                "email": "ann@example.com",
                "campaignId": "V",
                "additionalFields": {
                    "name": "Ann",
                    "tags": [{"tagId": "t1"}],
                    "customFieldsUi": {
                        "customFieldValues": [
                            {"customFieldId": "a", "value": "red"},
                            {"customFieldId": "b", "value": ["x", "y"]}
                        ]
                    }
                }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(node.execute(&create).await.unwrap(), vec![json!({"success": true})]);

    let get = ParameterSet::from_json(
        r#"{"parameters": {"operation": "get", "contactId": "c1", "options": {"fields": "name,email"}}}"#,
    )
    .unwrap();
    let output = node.execute(&get).await.unwrap();
    assert_eq!(output[0]["contactId"], "c1");
    assert_eq!(output[0]["name"], "Ann");
}

#[tokio::test]
async fn test_update_and_delete_contact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contacts/c1"))
        .and(body_json(json!({
            "note": "vip",
            "customFieldValues": [{"customFieldId": "a", "value": "red"}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"contactId": "c1", "note": "vip"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/contacts/c1"))
        .and(query_param("ipAddress", "1.2.3.4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let node = node(&server, "");

    let update = ParameterSet::from_json(
        r#"{"parameters": {
            "operation": "update",
            "contactId": "c1",
            "updateFields": {
                "note": "vip",
                "customFieldsUi": {"customFieldValues": [{"customFieldId": "a", "value": "red"}]}
            }
        }}"#,
    )
    .unwrap();
    assert_eq!(
        node.execute(&update).await.unwrap(),
        vec![json!({"contactId": "c1", "note": "vip"})]
    );

    let delete = ParameterSet::from_json(
        r#"{"parameters": {"operation": "delete", "contactId": "c1", "options": {"ipAddress": "1.2.3.4"}}}"#,
    )
    .unwrap();
    assert_eq!(node.execute(&delete).await.unwrap(), vec![json!({"success": true})]);
}

#[tokio::test]
async fn test_create_sent_once_on_server_error_with_default_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        "base_url: \"{}\"\nauth:\n  type: api_key\n  api_key: integration-key\n",
        server.uri()
    );
    let config = load_config_from_str(&yaml).unwrap();
    let node = GetResponseNode::from_config(&config).unwrap();

    let create = ParameterSet::from_json(
        r#"{"parameters": {"operation": "create", "email": "ann@example.com", "campaignId": "V"}}"#,
    )
    .unwrap();
    let err = node.execute(&create).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_get_all_return_all_with_filters() {
    let server = MockServer::start().await;

    let page = |ids: std::ops::Range<u32>| {
        json!(ids.map(|id| json!({"contactId": id})).collect::<Vec<_>>())
    };

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("page", "1"))
        .and(query_param("perPage", "3"))
        .and(query_param("query[email]", "example.com"))
        .and(query_param("query[createdOn][from]", "2021-03-01T00:00:00-0500"))
        .and(query_param("sort[createdOn]", "ASC"))
        .and(query_param("additionalFlags", "exactMatch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0..3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(3..6)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(6..7)))
        .expect(1)
        .mount(&server)
        .await;

    let node = node(&server, "pagination:\n  page_size: 3");
    let params = ParameterSet::from_json(
        r#"{"parameters": {
            "operation": "getAll",
            "returnAll": true,
            "options": {
                "email": "example.com",
                "exactMatch": true,
                "createdOnFrom": "2021-03-01",
                "sortBy": "createdOn"
            }
        }}"#,
    )
    .unwrap();

    let output = node.execute(&params).await.unwrap();
    let ids: Vec<u64> = output
        .iter()
        .map(|c| c["contactId"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, (0..7u64).collect::<Vec<_>>());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
    for request in &received {
        let keys: Vec<String> = request.url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert!(!keys.iter().any(|k| k == "sortBy" || k == "sortOrder" || k == "exactMatch"));
    }
}

#[tokio::test]
async fn test_get_all_page_cap_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
        .expect(2)
        .mount(&server)
        .await;

    let node = node(&server, "pagination:\n  page_size: 2\n  max_pages: 2");
    let params = ParameterSet::from_json(
        r#"{"parameters": {"operation": "getAll", "returnAll": true}}"#,
    )
    .unwrap();

    let err = node.execute(&params).await.unwrap_err();
    assert!(matches!(err, Error::PageLimitExceeded { max_pages: 2 }));
}

#[tokio::test]
async fn test_get_all_default_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("perPage", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let node = node(&server, "");
    let params =
        ParameterSet::from_json(r#"{"parameters": {"operation": "getAll"}}"#).unwrap();
    assert_eq!(node.execute(&params).await.unwrap(), vec![json!({"id": 1})]);
}

// ============================================================================
// Options and Description
// ============================================================================

#[tokio::test]
async fn test_load_options_for_declared_methods() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .and(header("X-Auth-Token", "api-key integration-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"campaignId": "V", "name": "Newsletter"}])),
        )
        .mount(&server)
        .await;

    let node = node(&server, "");
    let description = NodeDescription::getresponse();
    let method_name = description
        .property("campaignId", Some("create"))
        .and_then(|p| p.load_options_method.clone())
        .unwrap();

    let options = node.load_options(&method_name).await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].name, "Newsletter");
    assert_eq!(options[0].value, "V");
}

#[tokio::test]
async fn test_oauth2_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .and(header("Authorization", "Bearer oauth-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        "base_url: \"{}\"\nauth:\n  type: oauth2\n  access_token: oauth-token\nhttp:\n  rate_limit: null\n",
        server.uri()
    );
    let config = load_config_from_str(&yaml).unwrap();
    let node = GetResponseNode::from_config(&config).unwrap();
    assert!(node.load_tags().await.unwrap().is_empty());
}
