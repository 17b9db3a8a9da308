//! Outcome envelope returned by the engine.
//!
//! Mirrors the gateway's response shape: a status code plus a JSON body.
//! Remote adapter and authorization-server outcomes are passed through
//! verbatim in this shape.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResponse {
    pub status_code: u16,
    pub body: Value,
}

impl FlowResponse {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    /// 404 — flow/adapter/credential/config record absent, or unknown
    /// adapter type / action.
    pub fn not_found() -> Self {
        Self::new(404, json!("Item not Found"))
    }

    /// 400 — payload rejected by the filter chain (or no criteria stored;
    /// the engine fails closed).
    pub fn filter_failed() -> Self {
        Self::new(400, json!("Filter condition does not satisfied"))
    }

    /// 403 — flow name already taken by another flow.
    pub fn name_conflict() -> Self {
        Self::new(403, json!("Please assign the flow another name"))
    }

    /// 201 with an arbitrary body.
    pub fn created(body: Value) -> Self {
        Self::new(201, body)
    }

    /// 201 — remote system answered 204 on a create action.
    pub fn record_inserted() -> Self {
        Self::new(201, json!("Record inserted successfully"))
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 201
    }
}
