//! Unit tests for the transform engine.

use std::collections::HashMap;
use std::sync::Arc;

use integration_flow_api::EngineError;
use integration_flow_api::services::TransformerService;
use integration_flow_api::storage::{KeyValueStore, MemoryStore, tables};
use serde_json::json;

fn mapping(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_noop_mapping_is_idempotent() {
    let payload = json!({"x": 5});
    let out = TransformerService::transform(&mapping(&[("x", ".x")]), &payload).unwrap();
    assert_eq!(out, json!({"x": 5}));
}

#[test]
fn test_field_rename_and_nested_path() {
    let payload = json!({
        "country": "India",
        "address": {"city": "Pune", "geo": {"lat": 18.52}}
    });
    let out = TransformerService::transform(
        &mapping(&[
            ("nation", ".country"),
            ("city", ".address.city"),
            ("latitude", ".address.geo.lat"),
        ]),
        &payload,
    )
    .unwrap();
    assert_eq!(
        out,
        json!({"nation": "India", "city": "Pune", "latitude": 18.52})
    );
}

#[test]
fn test_missing_path_yields_null_not_error() {
    let payload = json!({"country": "India"});
    let out = TransformerService::transform(
        &mapping(&[("nation", ".country"), ("region", ".continent")]),
        &payload,
    )
    .unwrap();
    assert_eq!(out, json!({"nation": "India", "region": null}));
}

#[test]
fn test_malformed_expression_is_hard_error() {
    let payload = json!({"country": "India"});
    let err =
        TransformerService::transform(&mapping(&[("nation", "country")]), &payload).unwrap_err();
    assert!(matches!(err, EngineError::MalformedMapping { .. }));

    // Dangling segments are malformed too.
    let err =
        TransformerService::transform(&mapping(&[("nation", ".country.")]), &payload).unwrap_err();
    assert!(matches!(err, EngineError::MalformedMapping { .. }));
}

#[test]
fn test_dot_selects_whole_payload() {
    let payload = json!({"a": 1});
    let out = TransformerService::transform(&mapping(&[("all", ".")]), &payload).unwrap();
    assert_eq!(out, json!({"all": {"a": 1}}));
}

#[test]
fn test_output_independent_of_entry_order() {
    let payload = json!({"a": 1, "b": 2});
    let forward = TransformerService::transform(&mapping(&[("x", ".a"), ("y", ".b")]), &payload);
    let backward = TransformerService::transform(&mapping(&[("y", ".b"), ("x", ".a")]), &payload);
    assert_eq!(forward.unwrap(), backward.unwrap());
}

#[tokio::test]
async fn test_transform_by_id() {
    let store = Arc::new(MemoryStore::new());
    store
        .put(
            tables::TRANSFORMER,
            "t1",
            json!({
                "id": "t1",
                "name": "customer-mapping",
                "status": "ACTIVE",
                "input_payload": {"country": "India"},
                "mapping_payload": {"nation": ".country"}
            }),
        )
        .await
        .unwrap();
    let service = TransformerService::new(store, "t1");
    let out = service
        .transform_by_id(&json!({"country": "India"}), "corr-1")
        .await
        .unwrap();
    assert_eq!(out, Some(json!({"nation": "India"})));
}

#[tokio::test]
async fn test_transform_by_id_missing_transformer() {
    let store = Arc::new(MemoryStore::new());
    let service = TransformerService::new(store, "absent");
    let out = service
        .transform_by_id(&json!({"country": "India"}), "corr-1")
        .await
        .unwrap();
    assert_eq!(out, None);
}

#[tokio::test]
async fn test_get_transformer_exposes_sample_input() {
    let store = Arc::new(MemoryStore::new());
    store
        .put(
            tables::TRANSFORMER,
            "t1",
            json!({
                "id": "t1",
                "name": "customer-mapping",
                "status": "ACTIVE",
                "input_payload": {"country": "India"},
                "mapping_payload": {"nation": ".country"}
            }),
        )
        .await
        .unwrap();
    let service = TransformerService::new(store, "t1");
    let transformer = service.get_transformer().await.unwrap().unwrap();
    assert_eq!(transformer.input_payload, json!({"country": "India"}));
}
