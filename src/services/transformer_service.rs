//! Transform engine: reshapes a JSON payload according to a stored field
//! mapping.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::EngineError;
use crate::models::Transformer;
use crate::storage::{KeyValueStore, tables};

/// Service for loading and applying one stored transformer.
pub struct TransformerService {
    store: Arc<dyn KeyValueStore>,
    transformer_id: String,
}

impl TransformerService {
    pub fn new(store: Arc<dyn KeyValueStore>, transformer_id: impl Into<String>) -> Self {
        Self {
            store,
            transformer_id: transformer_id.into(),
        }
    }

    /// Fetch the full transformer record, `None` when absent.
    pub async fn get_transformer(&self) -> Result<Option<Transformer>, EngineError> {
        let Some(record) = self.store.get(tables::TRANSFORMER, &self.transformer_id).await? else {
            info!(transformer_id = %self.transformer_id, "No transformer found with this id");
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(record)?))
    }

    async fn get_mapping(&self) -> Result<Option<HashMap<String, String>>, EngineError> {
        Ok(self.get_transformer().await?.map(|t| t.mapping_payload))
    }

    /// Apply this transformer's stored mapping. `None` when the transformer
    /// or its mapping is absent.
    pub async fn transform_by_id(
        &self,
        payload: &Value,
        correlation_id: &str,
    ) -> Result<Option<Value>, EngineError> {
        match self.get_mapping().await? {
            Some(mapping) => Ok(Some(Self::transform(&mapping, payload)?)),
            None => {
                info!(
                    transformer_id = %self.transformer_id,
                    correlation_id,
                    "Could not find mapping for this transformer"
                );
                Ok(None)
            }
        }
    }

    /// Pure mapping application: every entry extracts one dot-path from
    /// `payload` into the output object under the entry's name.
    ///
    /// A path that resolves to nothing yields null for that field; an
    /// expression without the leading path marker is a hard error.
    pub fn transform(mapping: &HashMap<String, String>, payload: &Value) -> Result<Value, EngineError> {
        let mut out = Map::with_capacity(mapping.len());
        for (field, expression) in mapping {
            out.insert(field.clone(), extract_path(expression, payload)?);
        }
        Ok(Value::Object(out))
    }
}

/// Evaluate a restricted jq-style path expression (`.a.b.c`) against a
/// payload. `.` alone selects the whole payload.
fn extract_path(expression: &str, payload: &Value) -> Result<Value, EngineError> {
    let Some(path) = expression.strip_prefix('.') else {
        return Err(EngineError::MalformedMapping {
            expression: expression.to_string(),
        });
    };
    if path.is_empty() {
        return Ok(payload.clone());
    }
    if path.split('.').any(str::is_empty) {
        return Err(EngineError::MalformedMapping {
            expression: expression.to_string(),
        });
    }
    let mut current = payload;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return Ok(Value::Null),
        }
    }
    Ok(current.clone())
}
