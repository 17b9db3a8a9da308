//! Adapter-definition lookup.

use std::sync::Arc;

use tracing::info;

use crate::error::EngineError;
use crate::models::Adapter;
use crate::storage::{KeyValueStore, tables};

pub struct AdapterService {
    store: Arc<dyn KeyValueStore>,
}

impl AdapterService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fetch an adapter definition, `None` when absent.
    pub async fn get(&self, id: &str) -> Result<Option<Adapter>, EngineError> {
        let Some(record) = self.store.get(tables::ADAPTER, id).await? else {
            info!(adapter_id = %id, "No adapter found with this id");
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(record)?))
    }
}
