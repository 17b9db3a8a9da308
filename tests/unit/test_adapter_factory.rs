//! Unit tests for adapter resolution and action dispatch.

use integration_flow_api::EngineConfig;
use integration_flow_api::adapters::{self, MICROSOFT_GP, ORACLE_NETSUITE};
use serde_json::json;

fn config() -> EngineConfig {
    EngineConfig::new("http://localhost:0")
}

#[test]
fn test_resolve_known_types() {
    assert!(adapters::resolve(ORACLE_NETSUITE, "corr-1", &config()).is_some());
    assert!(adapters::resolve(MICROSOFT_GP, "corr-1", &config()).is_some());
}

#[test]
fn test_resolve_unknown_type_is_none_never_panics() {
    assert!(adapters::resolve("microsoftGpOracle", "corr-1", &config()).is_none());
    assert!(adapters::resolve("", "corr-1", &config()).is_none());
}

#[tokio::test]
async fn test_microsoft_gp_create_customer_stub() {
    let client = adapters::resolve(MICROSOFT_GP, "corr-1", &config()).unwrap();
    let response = client
        .invoke("create_customer", &json!({"name": "acme"}), "token")
        .await
        .unwrap()
        .expect("registered action");
    assert_eq!(response.status_code, 201);
}

#[tokio::test]
async fn test_unknown_action_resolves_to_none() {
    let client = adapters::resolve(MICROSOFT_GP, "corr-1", &config()).unwrap();
    let response = client
        .invoke("create_invoice", &json!({}), "token")
        .await
        .unwrap();
    assert!(response.is_none());

    // NetSuite's registry rejects unknown actions before any HTTP call, so a
    // dead base URL is fine here.
    let client = adapters::resolve(ORACLE_NETSUITE, "corr-1", &config()).unwrap();
    let response = client.invoke("do_everything", &json!({}), "token").await.unwrap();
    assert!(response.is_none());
}
