//! Adapter clients for external business systems.
//!
//! Each adapter type maps to one concrete client; each client carries an
//! explicit action-name registry. Unknown adapter types and unknown actions
//! both surface as not-found outcomes, never as panics.

pub mod microsoft_gp;
pub mod netsuite;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::response::FlowResponse;

pub use microsoft_gp::MicrosoftGpClient;
pub use netsuite::NetSuiteClient;

/// Adapter-type discriminators stored on adapter definitions.
pub const ORACLE_NETSUITE: &str = "oracleNetsuite";
pub const MICROSOFT_GP: &str = "microsoftGp";

/// A connector to one external system, polymorphic over its action set.
///
/// `invoke` returns `Ok(None)` when the client has no handler registered for
/// `action`; the caller reports a not-found outcome without any remote call.
#[async_trait]
pub trait AdapterClient: Send + Sync {
    async fn invoke(
        &self,
        action: &str,
        payload: &Value,
        access_token: &str,
    ) -> Result<Option<FlowResponse>, EngineError>;
}

/// Resolve an adapter-type discriminator to a concrete client.
/// Unknown types resolve to `None`.
pub fn resolve(
    adapter_type: &str,
    correlation_id: &str,
    config: &EngineConfig,
) -> Option<Box<dyn AdapterClient>> {
    match adapter_type {
        ORACLE_NETSUITE => {
            info!(correlation_id, adapter_type, "Resolved NetSuite adapter client");
            Some(Box::new(NetSuiteClient::new(
                config.netsuite_base_url.clone(),
                correlation_id.to_string(),
            )))
        }
        MICROSOFT_GP => {
            info!(correlation_id, adapter_type, "Resolved Microsoft GP adapter client");
            Some(Box::new(MicrosoftGpClient::new(correlation_id.to_string())))
        }
        _ => {
            info!(correlation_id, adapter_type, "No adapter registered for type");
            None
        }
    }
}
