//! Microsoft Dynamics GP adapter client.
//!
//! Placeholder integration: acknowledges create actions with a fixed success
//! until the real GP connector lands.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use super::AdapterClient;
use crate::error::EngineError;
use crate::response::FlowResponse;

pub struct MicrosoftGpClient {
    correlation_id: String,
}

impl MicrosoftGpClient {
    pub fn new(correlation_id: String) -> Self {
        Self { correlation_id }
    }
}

#[async_trait]
impl AdapterClient for MicrosoftGpClient {
    async fn invoke(
        &self,
        action: &str,
        _payload: &Value,
        _access_token: &str,
    ) -> Result<Option<FlowResponse>, EngineError> {
        match action {
            "create_customer" => {
                info!(
                    correlation_id = %self.correlation_id,
                    "Microsoft GP create_customer (stub)"
                );
                Ok(Some(FlowResponse::created(json!("ok"))))
            }
            _ => Ok(None),
        }
    }
}
