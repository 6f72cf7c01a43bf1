//! Tests for the auth module

use super::*;

fn build(auth: &Authenticator) -> reqwest::Request {
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/crm/v3/objects/contacts");
    auth.apply(req).build().unwrap()
}

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let built = build(&auth);
    assert!(built.headers().get("Authorization").is_none());
    assert!(built.url().query().is_none());
}

#[test]
fn test_bearer() {
    let auth = Authenticator::new(AuthConfig::bearer("pat-na1-token"));
    let built = build(&auth);
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer pat-na1-token"
    );
}

#[test]
fn test_api_key_header_with_prefix() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        location: Location::Header,
        header_name: Some("X-API-Key".to_string()),
        query_param: None,
        prefix: Some("Key ".to_string()),
        value: "test-key-123".to_string(),
    });

    let built = build(&auth);
    assert_eq!(built.headers().get("X-API-Key").unwrap(), "Key test-key-123");
}

#[test]
fn test_api_key_query_default_param() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        location: Location::Query,
        header_name: None,
        query_param: None,
        prefix: None,
        value: "legacy-key".to_string(),
    });

    let built = build(&auth);
    assert_eq!(built.url().query(), Some("hapikey=legacy-key"));
}

#[test]
fn test_basic_auth() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    });

    let built = build(&auth);
    // base64("user:pass")
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Basic dXNlcjpwYXNz"
    );
}
