//! Integration tests for the OAuth2 token authenticator against a mocked
//! authorization server.

use integration_flow_api::models::OAuth2Config;
use integration_flow_api::services::{OAuth2Authenticator, TokenOutcome};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base: &str) -> OAuth2Config {
    OAuth2Config {
        id: Some("cfg-1".to_string()),
        client_id: "client-1".to_string(),
        client_secret: "secret-1".to_string(),
        authorize_url: format!("{base}/authorize"),
        token_url: format!("{base}/token"),
        refresh_token_url: format!("{base}/refresh"),
        callback_uri: "https://app.example.com/callback".to_string(),
        scope: "rest_webservices".to_string(),
        state: "fixed-state".to_string(),
        response_type: "code".to_string(),
    }
}

#[test]
fn test_authorization_url_is_deterministic() {
    let cfg = config("https://auth.example.com");
    let authenticator = OAuth2Authenticator::new(cfg, false).unwrap();
    assert_eq!(
        authenticator.authorization_url(),
        "https://auth.example.com/authorize?response_type=code&client_id=client-1\
         &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback\
         &scope=rest_webservices&state=fixed-state"
    );
}

#[tokio::test]
async fn test_authorization_code_exchange_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let authenticator = OAuth2Authenticator::new(config(&server.uri()), false).unwrap();
    match authenticator.grant_app_login("auth-code-1").await.unwrap() {
        TokenOutcome::Granted(tokens) => {
            assert_eq!(tokens.access_token, "access-1");
            assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-1"));
            assert_eq!(tokens.token_type, "Bearer");
        }
        TokenOutcome::Denied { status, .. } => panic!("unexpected denial: {status}"),
    }
}

#[tokio::test]
async fn test_refresh_exchange_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "expires_in": "3600",
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let authenticator = OAuth2Authenticator::new(config(&server.uri()), false).unwrap();
    match authenticator.get_new_access_token("refresh-1").await.unwrap() {
        TokenOutcome::Granted(tokens) => {
            assert_eq!(tokens.access_token, "access-2");
            // Refresh responses may omit the refresh token.
            assert_eq!(tokens.refresh_token, None);
        }
        TokenOutcome::Denied { status, .. } => panic!("unexpected denial: {status}"),
    }
}

#[tokio::test]
async fn test_non_200_surfaces_status_and_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string(r#"{"error":"invalid_grant"}"#),
        )
        .mount(&server)
        .await;

    let authenticator = OAuth2Authenticator::new(config(&server.uri()), false).unwrap();
    match authenticator.get_new_access_token("stale").await.unwrap() {
        TokenOutcome::Denied { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, r#"{"error":"invalid_grant"}"#);
        }
        TokenOutcome::Granted(_) => panic!("expected denial"),
    }
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "https://elsewhere.example.com/"),
        )
        .mount(&server)
        .await;

    let authenticator = OAuth2Authenticator::new(config(&server.uri()), false).unwrap();
    // A redirect is just another non-200: surfaced, never chased.
    match authenticator.grant_app_login("code").await.unwrap() {
        TokenOutcome::Denied { status, .. } => assert_eq!(status, 302),
        TokenOutcome::Granted(_) => panic!("expected denial"),
    }
}
