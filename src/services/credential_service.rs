//! Credential store: persistence for OAuth2 token records.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, json};
use tracing::info;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{OAuth2Credential, TokenResponse};
use crate::storage::{KeyValueStore, tables};

/// Refresh tokens are issued with a fixed seven-day TTL.
const REFRESH_TOKEN_TTL_SECS: i64 = 604_800;

pub struct CredentialService {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fetch a token record, `None` when absent.
    pub async fn get(&self, id: &str) -> Result<Option<OAuth2Credential>, EngineError> {
        let Some(record) = self.store.get(tables::OAUTH2_CREDENTIAL, id).await? else {
            info!(credential_id = %id, "No oauth2 entry found with this id");
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(record)?))
    }

    /// Persist a brand-new token record from an authorization-code exchange.
    ///
    /// Always assigns a fresh id, never the caller's.
    pub async fn save_new(&self, tokens: &TokenResponse) -> Result<OAuth2Credential, EngineError> {
        let refresh_token = tokens
            .refresh_token
            .clone()
            .ok_or(EngineError::MalformedTokenResponse("refresh_token"))?;
        let now = Utc::now();
        let credential = OAuth2Credential {
            id: Some(Uuid::new_v4().to_string()),
            access_token: tokens.access_token.clone(),
            access_token_expiry_time: tokens.expires_in.clone(),
            refresh_token,
            refresh_token_expiry_time: json!(REFRESH_TOKEN_TTL_SECS),
            token_type: tokens.token_type.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        let id = credential.id.clone().unwrap_or_default();
        self.store
            .put(
                tables::OAUTH2_CREDENTIAL,
                &id,
                serde_json::to_value(&credential)?,
            )
            .await?;
        info!(credential_id = %id, "Successfully added access token in DB");
        Ok(credential)
    }

    /// Overwrite the access token on an existing record, keyed by the same
    /// id. Only `access_token`, its expiry and `updated_at` change.
    pub async fn refresh_in_place(
        &self,
        id: &str,
        tokens: &TokenResponse,
    ) -> Result<OAuth2Credential, EngineError> {
        let mut deltas = Map::new();
        deltas.insert("access_token".to_string(), json!(tokens.access_token));
        deltas.insert(
            "access_token_expiry_time".to_string(),
            tokens.expires_in.clone(),
        );
        deltas.insert("updated_at".to_string(), json!(Utc::now()));
        let updated = self
            .store
            .update(tables::OAUTH2_CREDENTIAL, id, deltas)
            .await?;
        info!(credential_id = %id, "Successfully updated access token in DB");
        Ok(serde_json::from_value(updated)?)
    }
}
