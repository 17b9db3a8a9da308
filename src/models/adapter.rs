use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One action a connector exposes, with a JSON-schema description of its
/// expected input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterAction {
    pub name: String,
    pub input_attributes: serde_json::Value,
    pub function_name: String,
}

/// Stored connector definition for one external business system.
///
/// `adapter_type` discriminates the concrete client ("oracleNetsuite",
/// "microsoftGp"); `what_auth_id` points at the OAuth2 client config used to
/// refresh tokens for this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adapter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub status: String,
    pub list_of_actions: Vec<AdapterAction>,
    #[serde(rename = "type")]
    pub adapter_type: String,
    pub which_auth_mechanism: String,
    pub what_auth_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
