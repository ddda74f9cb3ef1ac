//! Tests for the auth module

use super::*;
use crate::error::Error;

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");

    let built = auth.apply(req).unwrap().build().unwrap();
    assert!(built.headers().get(API_KEY_HEADER).is_none());
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_api_key_header() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        api_key: "test-key-123".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://api.getresponse.com/v3/contacts");
    let built = auth.apply(req).unwrap().build().unwrap();

    assert_eq!(
        built.headers().get("X-Auth-Token").unwrap(),
        "api-key test-key-123"
    );
}

#[test]
fn test_oauth2_bearer() {
    let auth = Authenticator::new(AuthConfig::OAuth2 {
        access_token: "my-bearer-token".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://api.getresponse.com/v3/contacts");
    let built = auth.apply(req).unwrap().build().unwrap();

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
    assert!(built.headers().get(API_KEY_HEADER).is_none());
}

#[test]
fn test_empty_credentials_rejected() {
    let client = reqwest::Client::new();

    let auth = Authenticator::new(AuthConfig::ApiKey {
        api_key: String::new(),
    });
    let err = auth.apply(client.get("https://example.com")).unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));

    let auth = Authenticator::new(AuthConfig::OAuth2 {
        access_token: String::new(),
    });
    assert!(auth.apply(client.get("https://example.com")).is_err());
}
