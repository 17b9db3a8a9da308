use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stored transformer: maps output field names to dot-path extraction
/// expressions evaluated against the inbound payload.
///
/// `input_payload` is a sample payload kept for UI convenience; the engine
/// only reads it for the sample-input passthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transformer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub status: String,
    pub input_payload: serde_json::Value,
    pub mapping_payload: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
