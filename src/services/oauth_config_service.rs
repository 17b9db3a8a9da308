//! OAuth2 client-config lookup.

use std::sync::Arc;

use tracing::info;

use crate::error::EngineError;
use crate::models::OAuth2Config;
use crate::storage::{KeyValueStore, tables};

pub struct OAuthConfigService {
    store: Arc<dyn KeyValueStore>,
}

impl OAuthConfigService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fetch a client config, `None` when absent.
    pub async fn get(&self, id: &str) -> Result<Option<OAuth2Config>, EngineError> {
        let Some(record) = self.store.get(tables::OAUTH2_CONFIG, id).await? else {
            info!(config_id = %id, "No oauth config entry found with this id");
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(record)?))
    }

    /// Store a new client config. Configs are immutable once created.
    pub async fn create(&self, config: &OAuth2Config) -> Result<(), EngineError> {
        let id = config
            .id
            .clone()
            .ok_or_else(|| EngineError::InvalidDefinition("oauth config requires an id".into()))?;
        self.store
            .put(tables::OAUTH2_CONFIG, &id, serde_json::to_value(config)?)
            .await?;
        Ok(())
    }
}
