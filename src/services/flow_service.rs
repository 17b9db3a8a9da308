//! Flow-definition lookup and creation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::Flow;
use crate::response::FlowResponse;
use crate::storage::{KeyValueStore, tables};

pub struct FlowService {
    store: Arc<dyn KeyValueStore>,
}

impl FlowService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fetch a flow definition, `None` when absent.
    pub async fn get(&self, flow_id: &str) -> Result<Option<Flow>, EngineError> {
        let Some(record) = self.store.get(tables::FLOW, flow_id).await? else {
            info!(flow_id, "No flow found with this id");
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(record)?))
    }

    /// Create a flow.
    ///
    /// Flow names must be unique among stored flows, enforced by a pre-insert
    /// scan; a conflict yields a 403 outcome without touching the store.
    pub async fn create(&self, mut flow: Flow) -> Result<FlowResponse, EngineError> {
        let existing = self.store.scan(tables::FLOW).await?;
        let name_taken = existing
            .iter()
            .any(|record| record.get("name").and_then(|n| n.as_str()) == Some(flow.name.as_str()));
        if name_taken {
            info!(name = %flow.name, "A flow with the same name already exists");
            return Ok(FlowResponse::name_conflict());
        }

        let flow_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        flow.flow_url = Some(format!("{}/{}", flow.name, flow_id));
        flow.flow_id = Some(flow_id.clone());
        flow.created_at = Some(now);
        flow.updated_at = Some(now);

        let record = serde_json::to_value(&flow)?;
        self.store.put(tables::FLOW, &flow_id, record.clone()).await?;
        info!(flow_id = %flow_id, "Created flow");
        Ok(FlowResponse::created(record))
    }
}
