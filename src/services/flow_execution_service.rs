//! Flow execution engine.
//!
//! Runs one flow synchronously: load the definition, apply the filter chain,
//! apply the before-transform, ensure a valid access token (refreshing in
//! place when expired), invoke the adapter action, and record the outcome.
//!
//! A RUNNING execution record is written unconditionally before any stage
//! runs; only the adapter-call outcome writes a terminal status. Filter
//! rejections, missing records and refresh failures return early and leave
//! the record RUNNING — an at-least-once audit trail, not a correctness
//! mechanism.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::adapters;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{ExecutionStatus, Flow, FlowExecution, FlowStep};
use crate::response::FlowResponse;
use crate::services::adapter_service::AdapterService;
use crate::services::credential_service::CredentialService;
use crate::services::filter_service::FilterService;
use crate::services::flow_service::FlowService;
use crate::services::oauth_config_service::OAuthConfigService;
use crate::services::oauth_service::{OAuth2Authenticator, TokenOutcome};
use crate::services::transformer_service::TransformerService;
use crate::storage::{KeyValueStore, tables};

/// Result of the credential validity gate.
enum TokenGate {
    Token(String),
    /// Early-exit outcome: missing record/config or a refresh denial,
    /// passed through verbatim. The adapter call is skipped entirely.
    Abort(FlowResponse),
}

pub struct FlowExecutionService {
    store: Arc<dyn KeyValueStore>,
    config: EngineConfig,
    flow_id: String,
    correlation_id: String,
}

impl FlowExecutionService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: EngineConfig,
        flow_id: impl Into<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            config,
            flow_id: flow_id.into(),
            correlation_id: correlation_id.into(),
        }
    }

    /// Execute the flow against `payload` and return the overall outcome.
    pub async fn process(&self, payload: &Value) -> Result<FlowResponse, EngineError> {
        self.create_execution().await?;
        info!(
            flow_id = %self.flow_id,
            correlation_id = %self.correlation_id,
            "Execution started"
        );

        let Some(flow) = FlowService::new(self.store.clone()).get(&self.flow_id).await? else {
            return Ok(FlowResponse::not_found());
        };
        let step = first_step(&flow)?;

        let filter = FilterService::new(self.store.clone(), step.filter_id.as_str());
        let passed = filter
            .apply_filter_result(payload, &self.correlation_id)
            .await?;
        if passed != Some(true) {
            // Inapplicable filters fail closed.
            info!(
                correlation_id = %self.correlation_id,
                "Filter condition not satisfied"
            );
            return Ok(FlowResponse::filter_failed());
        }

        let transformer = TransformerService::new(self.store.clone(), step.before_transformer_id.as_str());
        let Some(mapped_data) = transformer
            .transform_by_id(payload, &self.correlation_id)
            .await?
        else {
            return Ok(FlowResponse::not_found());
        };
        info!(
            correlation_id = %self.correlation_id,
            "Payload transformed"
        );

        let Some(adapter) = AdapterService::new(self.store.clone())
            .get(&step.adapter_id)
            .await?
        else {
            return Ok(FlowResponse::not_found());
        };

        let access_token = match self
            .ensure_access_token(&flow.auth_id, &adapter.what_auth_id)
            .await?
        {
            TokenGate::Token(token) => token,
            TokenGate::Abort(response) => return Ok(response),
        };

        let Some(client) = adapters::resolve(&adapter.adapter_type, &self.correlation_id, &self.config)
        else {
            return Ok(FlowResponse::not_found());
        };
        let Some(adapter_response) = client
            .invoke(&step.action_name, &mapped_data, &access_token)
            .await?
        else {
            info!(
                correlation_id = %self.correlation_id,
                action = %step.action_name,
                "Adapter does not expose this action"
            );
            return Ok(FlowResponse::not_found());
        };

        // The only place the execution record gets its terminal status.
        self.update_execution_status(&adapter_response).await?;
        info!(
            correlation_id = %self.correlation_id,
            status = adapter_response.status_code,
            "Execution completed"
        );
        Ok(adapter_response)
    }

    /// Non-mutating passthrough: the before-transformer's stored example
    /// input, for UI convenience.
    pub async fn get_sample_input_payload(&self) -> Result<FlowResponse, EngineError> {
        let Some(flow) = FlowService::new(self.store.clone()).get(&self.flow_id).await? else {
            return Ok(FlowResponse::not_found());
        };
        let step = first_step(&flow)?;
        let transformer = TransformerService::new(self.store.clone(), step.before_transformer_id.as_str());
        match transformer.get_transformer().await? {
            Some(t) => Ok(FlowResponse::created(t.input_payload)),
            None => Ok(FlowResponse::not_found()),
        }
    }

    /// Execution history for this flow, 404 when none exist.
    pub async fn get_executions(&self) -> Result<FlowResponse, EngineError> {
        self.list_executions(None).await
    }

    /// Execution history for this flow in one status, 404 when none match.
    pub async fn get_executions_by_status(
        &self,
        status: ExecutionStatus,
    ) -> Result<FlowResponse, EngineError> {
        self.list_executions(Some(status)).await
    }

    async fn list_executions(
        &self,
        status: Option<ExecutionStatus>,
    ) -> Result<FlowResponse, EngineError> {
        let wanted = status.map(|s| serde_json::to_value(s)).transpose()?;
        let records = self.store.scan(tables::FLOW_EXECUTION).await?;
        let matches: Vec<Value> = records
            .into_iter()
            .filter(|r| r.get("flow_id").and_then(|v| v.as_str()) == Some(self.flow_id.as_str()))
            .filter(|r| match &wanted {
                Some(s) => r.get("status") == Some(s),
                None => true,
            })
            .collect();
        if matches.is_empty() {
            info!(flow_id = %self.flow_id, "No flow executions found with this id");
            return Ok(FlowResponse::not_found());
        }
        Ok(FlowResponse::new(200, Value::Array(matches)))
    }

    /// Write the RUNNING record keyed by the correlation id. Happens before
    /// any stage runs; a crash mid-pipeline leaves it RUNNING.
    async fn create_execution(&self) -> Result<(), EngineError> {
        let execution =
            FlowExecution::started(self.flow_id.clone(), self.correlation_id.clone());
        self.store
            .put(
                tables::FLOW_EXECUTION,
                &self.correlation_id,
                serde_json::to_value(&execution)?,
            )
            .await?;
        Ok(())
    }

    /// Terminal-status write, driven strictly by the adapter-call outcome.
    async fn update_execution_status(
        &self,
        adapter_response: &FlowResponse,
    ) -> Result<(), EngineError> {
        let status = if adapter_response.is_success() {
            info!(correlation_id = %self.correlation_id, "Execution is successful");
            ExecutionStatus::Success
        } else {
            info!(correlation_id = %self.correlation_id, "Execution is failed");
            ExecutionStatus::Failure
        };
        let mut deltas = Map::new();
        deltas.insert("status".to_string(), serde_json::to_value(status)?);
        deltas.insert("updated_at".to_string(), json!(Utc::now()));
        self.store
            .update(tables::FLOW_EXECUTION, &self.correlation_id, deltas)
            .await?;
        Ok(())
    }

    /// Credential validity gate.
    ///
    /// Uses the stored access token while it is fresh; otherwise loads the
    /// adapter's OAuth2 client config, exchanges the refresh token and
    /// rewrites the credential record in place. There is deliberately no
    /// conditional write: two concurrent runs may both refresh, each ending
    /// with a valid token.
    async fn ensure_access_token(
        &self,
        auth_id: &str,
        what_auth_id: &str,
    ) -> Result<TokenGate, EngineError> {
        let credentials = CredentialService::new(self.store.clone());
        let Some(credential) = credentials.get(auth_id).await? else {
            return Ok(TokenGate::Abort(FlowResponse::not_found()));
        };

        if credential.is_valid(Utc::now()) {
            info!(correlation_id = %self.correlation_id, "Access token is valid");
            return Ok(TokenGate::Token(credential.access_token));
        }
        info!(
            correlation_id = %self.correlation_id,
            "Access token is expired, requesting new access token"
        );

        let Some(auth_config) = OAuthConfigService::new(self.store.clone())
            .get(what_auth_id)
            .await?
        else {
            return Ok(TokenGate::Abort(FlowResponse::not_found()));
        };

        let authenticator =
            OAuth2Authenticator::new(auth_config, self.config.accept_invalid_certs)?;
        match authenticator
            .get_new_access_token(&credential.refresh_token)
            .await?
        {
            TokenOutcome::Granted(tokens) => {
                let updated = credentials.refresh_in_place(auth_id, &tokens).await?;
                Ok(TokenGate::Token(updated.access_token))
            }
            TokenOutcome::Denied { status, body } => {
                info!(
                    correlation_id = %self.correlation_id,
                    status,
                    "Failed to get new access token with refresh token"
                );
                Ok(TokenGate::Abort(FlowResponse::new(status, json!(body))))
            }
        }
    }
}

/// Only the head of the pipeline executes in the current design; a flow with
/// no steps is a malformed definition and fails loud.
fn first_step(flow: &Flow) -> Result<&FlowStep, EngineError> {
    flow.flowstep
        .first()
        .ok_or_else(|| EngineError::InvalidDefinition("flow has no flowstep".into()))
}
