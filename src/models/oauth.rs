use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted OAuth2 token record.
///
/// Created when an authorization code is first exchanged; refreshed in place
/// (same id) afterwards. Expiry fields are kept as loose JSON because stored
/// rows mix numbers and numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Credential {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub access_token: String,
    pub access_token_expiry_time: Value,
    pub refresh_token: String,
    pub refresh_token_expiry_time: Value,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Normalize a stored TTL to whole seconds. Accepts a JSON number or a
/// numeric string; anything else is `None`, which callers treat as expired.
pub fn expiry_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

impl OAuth2Credential {
    /// A token is valid while `updated_at + access_token_expiry_time` lies in
    /// the future. Missing `updated_at`, a non-numeric TTL or a negative TTL
    /// all count as already expired and trigger the refresh path.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        let Some(updated_at) = self.updated_at else {
            return false;
        };
        match expiry_seconds(&self.access_token_expiry_time) {
            Some(secs) if secs >= 0 => updated_at + Duration::seconds(secs) > now,
            _ => false,
        }
    }
}

/// OAuth2 client configuration for one authorization server.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub refresh_token_url: String,
    pub callback_uri: String,
    pub scope: String,
    pub state: String,
    pub response_type: String,
}

/// Body of a successful token-endpoint response.
///
/// `expires_in` stays loose JSON for the same reason as the stored TTLs;
/// refresh responses may omit `refresh_token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: Value,
    pub token_type: String,
}
