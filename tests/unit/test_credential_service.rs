//! Unit tests for credential storage and token validity.

use std::sync::Arc;

use chrono::{Duration, Utc};
use integration_flow_api::models::{OAuth2Credential, TokenResponse};
use integration_flow_api::services::CredentialService;
use integration_flow_api::storage::{KeyValueStore, MemoryStore, tables};
use serde_json::{Value, json};

fn credential(expiry: Value, age_secs: i64) -> OAuth2Credential {
    let updated_at = Utc::now() - Duration::seconds(age_secs);
    OAuth2Credential {
        id: Some("cred-1".to_string()),
        access_token: "token-abc".to_string(),
        access_token_expiry_time: expiry,
        refresh_token: "refresh-xyz".to_string(),
        refresh_token_expiry_time: json!(604800),
        token_type: "Bearer".to_string(),
        created_at: Some(updated_at),
        updated_at: Some(updated_at),
    }
}

#[test]
fn test_is_valid_expired() {
    // updated 10s ago with a 5s TTL: expired.
    let cred = credential(json!(5), 10);
    assert!(!cred.is_valid(Utc::now()));
}

#[test]
fn test_is_valid_fresh() {
    let cred = credential(json!(3600), 10);
    assert!(cred.is_valid(Utc::now()));
}

#[test]
fn test_is_valid_numeric_string_ttl() {
    let cred = credential(json!("3600"), 10);
    assert!(cred.is_valid(Utc::now()));
}

#[test]
fn test_is_valid_garbage_or_negative_ttl_counts_as_expired() {
    assert!(!credential(json!("soon"), 0).is_valid(Utc::now()));
    assert!(!credential(json!(-1), 0).is_valid(Utc::now()));
    assert!(!credential(json!(null), 0).is_valid(Utc::now()));
}

#[test]
fn test_is_valid_missing_updated_at() {
    let mut cred = credential(json!(3600), 0);
    cred.updated_at = None;
    assert!(!cred.is_valid(Utc::now()));
}

fn tokens(access_token: &str, refresh_token: Option<&str>) -> TokenResponse {
    TokenResponse {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_in: json!(3600),
        token_type: "Bearer".to_string(),
    }
}

#[tokio::test]
async fn test_save_new_assigns_fresh_id() {
    let store = Arc::new(MemoryStore::new());
    let service = CredentialService::new(store.clone());

    let saved = service
        .save_new(&tokens("access-1", Some("refresh-1")))
        .await
        .unwrap();
    let id = saved.id.clone().expect("fresh id assigned");
    assert!(!id.is_empty());
    assert_eq!(saved.refresh_token, "refresh-1");
    assert_eq!(saved.refresh_token_expiry_time, json!(604800));

    let stored = store
        .get(tables::OAUTH2_CREDENTIAL, &id)
        .await
        .unwrap()
        .expect("record persisted");
    assert_eq!(stored.get("access_token"), Some(&json!("access-1")));

    // A second bootstrap gets its own id.
    let again = service
        .save_new(&tokens("access-2", Some("refresh-2")))
        .await
        .unwrap();
    assert_ne!(again.id, saved.id);
}

#[tokio::test]
async fn test_save_new_requires_refresh_token() {
    let store = Arc::new(MemoryStore::new());
    let service = CredentialService::new(store);
    assert!(service.save_new(&tokens("access-1", None)).await.is_err());
}

#[tokio::test]
async fn test_refresh_in_place_keeps_id_and_refresh_token() {
    let store = Arc::new(MemoryStore::new());
    let service = CredentialService::new(store.clone());
    store
        .put(
            tables::OAUTH2_CREDENTIAL,
            "cred-1",
            serde_json::to_value(credential(json!(5), 100)).unwrap(),
        )
        .await
        .unwrap();

    let updated = service
        .refresh_in_place("cred-1", &tokens("access-new", None))
        .await
        .unwrap();

    assert_eq!(updated.id.as_deref(), Some("cred-1"));
    assert_eq!(updated.access_token, "access-new");
    assert_eq!(updated.access_token_expiry_time, json!(3600));
    // Refresh token and its TTL are untouched.
    assert_eq!(updated.refresh_token, "refresh-xyz");
    assert!(updated.is_valid(Utc::now()));
}

#[tokio::test]
async fn test_refresh_in_place_missing_record() {
    let store = Arc::new(MemoryStore::new());
    let service = CredentialService::new(store);
    assert!(
        service
            .refresh_in_place("no-such-cred", &tokens("x", None))
            .await
            .is_err()
    );
}
