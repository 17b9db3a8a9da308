use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stage of a flow pipeline.
///
/// All six fields are required when the flow is authored.
/// `after_transformer_id` is stored but not applied anywhere yet; it is the
/// extension point for a post-call transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowStep {
    pub order: String,
    pub action_name: String,
    pub filter_id: String,
    pub before_transformer_id: String,
    pub adapter_id: String,
    pub after_transformer_id: String,
}

/// A named, linear integration pipeline: filter -> transform -> adapter call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_url: Option<String>,
    #[serde(default)]
    pub adapter_img: String,
    pub flowstep: Vec<FlowStep>,
    pub auth_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Terminal and in-progress states of a flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Running,
    Success,
    Failure,
}

/// Audit record for a single flow run, keyed by the correlation id.
///
/// Created with status RUNNING before any stage executes and mutated at most
/// once afterwards, to its terminal status. Never deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowExecution {
    pub flow_id: String,
    pub execution_id: String,
    pub status: ExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FlowExecution {
    pub fn started(flow_id: String, execution_id: String) -> Self {
        let now = Utc::now();
        Self {
            flow_id,
            execution_id,
            status: ExecutionStatus::Running,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

impl Flow {
    /// Correlation ids double as execution-record keys; dashes are stripped
    /// the way the original gateway formats them.
    pub fn new_correlation_id() -> String {
        Uuid::new_v4().to_string().replace('-', "_")
    }
}
