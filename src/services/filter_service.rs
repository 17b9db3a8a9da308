//! Filter engine: evaluates a stored criterion chain against a JSON payload.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::error::EngineError;
use crate::models::{ChainOperator, FilterCondition, FilterCriterion};
use crate::storage::{KeyValueStore, tables};

/// Service for loading and applying one stored filter.
pub struct FilterService {
    store: Arc<dyn KeyValueStore>,
    filter_id: String,
}

impl FilterService {
    pub fn new(store: Arc<dyn KeyValueStore>, filter_id: impl Into<String>) -> Self {
        Self {
            store,
            filter_id: filter_id.into(),
        }
    }

    /// Fetch the stored criteria. `None` when the filter record is absent or
    /// carries no criteria at all.
    pub async fn get_filter_criteria(&self) -> Result<Option<Vec<FilterCriterion>>, EngineError> {
        let Some(record) = self.store.get(tables::FILTER, &self.filter_id).await? else {
            info!(filter_id = %self.filter_id, "No filter found with this id");
            return Ok(None);
        };
        let Some(raw) = record.get("filter_criteria") else {
            return Ok(None);
        };
        let criteria: Vec<FilterCriterion> = serde_json::from_value(raw.clone())?;
        if criteria.is_empty() {
            return Ok(None);
        }
        Ok(Some(criteria))
    }

    /// Evaluate this filter against `payload`.
    ///
    /// `None` means inapplicable (no stored criteria); the execution engine
    /// fails closed on that.
    pub async fn apply_filter_result(
        &self,
        payload: &Value,
        correlation_id: &str,
    ) -> Result<Option<bool>, EngineError> {
        match self.get_filter_criteria().await? {
            Some(criteria) => Ok(Some(Self::evaluate(&criteria, payload))),
            None => {
                info!(
                    filter_id = %self.filter_id,
                    correlation_id,
                    "Could not find filter criteria for this filter"
                );
                Ok(None)
            }
        }
    }

    /// Evaluate a criterion chain with strict left-to-right folding.
    ///
    /// Each criterion's `operator` joins its result to the next criterion;
    /// there is no precedence between `and` and `or`. An empty operator ends
    /// the chain. A `contains`/`does_not_contain` criterion whose key is
    /// absent from the payload decides the whole chain to `false`.
    pub fn evaluate(criteria: &[FilterCriterion], payload: &Value) -> bool {
        let mut iter = criteria.iter();
        let Some(first) = iter.next() else {
            return false;
        };

        let mut acc = match eval_criterion(first, payload) {
            Some(v) => v,
            None => return false,
        };
        let mut op = first.operator;

        for criterion in iter {
            if op == ChainOperator::None {
                break;
            }
            let value = match eval_criterion(criterion, payload) {
                Some(v) => v,
                None => return false,
            };
            acc = match op {
                ChainOperator::And => acc && value,
                ChainOperator::Or => acc || value,
                ChainOperator::None => unreachable!(),
            };
            op = criterion.operator;
        }
        acc
    }
}

/// Evaluate a single criterion. `None` is the whole-chain short circuit for
/// substring checks on a missing key.
fn eval_criterion(criterion: &FilterCriterion, payload: &Value) -> Option<bool> {
    let field = payload.get(&criterion.key);
    match criterion.condition {
        FilterCondition::EqualTo => {
            Some(field.map(stringify).as_deref() == Some(criterion.value.as_str()))
        }
        // Absence counts as "not equal".
        FilterCondition::NotEqualTo => {
            Some(field.map(stringify).as_deref() != Some(criterion.value.as_str()))
        }
        FilterCondition::HasKey => Some(field.is_some()),
        FilterCondition::Contains => {
            let field = field?;
            Some(contains_ci(&stringify(field), &criterion.value))
        }
        FilterCondition::DoesNotContain => {
            let field = field?;
            Some(!contains_ci(&stringify(field), &criterion.value))
        }
        FilterCondition::StartsWith => {
            Some(field.map(stringify).is_some_and(|s| s.starts_with(&criterion.value)))
        }
        FilterCondition::EndsWith => {
            Some(field.map(stringify).is_some_and(|s| s.ends_with(&criterion.value)))
        }
        FilterCondition::GreaterThan => Some(numeric_cmp(field, &criterion.value, |a, b| a > b)),
        FilterCondition::LessThan => Some(numeric_cmp(field, &criterion.value, |a, b| a < b)),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn numeric_cmp(field: Option<&Value>, value: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    let lhs = match field {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let rhs = value.trim().parse::<f64>().ok();
    match (lhs, rhs) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}
