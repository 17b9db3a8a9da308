use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comparison applied by a single filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    EqualTo,
    NotEqualTo,
    Contains,
    DoesNotContain,
    HasKey,
    #[serde(rename = "startswith")]
    StartsWith,
    #[serde(rename = "endswith")]
    EndsWith,
    GreaterThan,
    LessThan,
}

/// Boolean connective joining a criterion's result to the next criterion.
///
/// The terminal criterion carries an empty operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChainOperator {
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
    #[default]
    #[serde(rename = "")]
    None,
}

/// A single predicate over one payload field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub key: String,
    pub value: String,
    pub condition: FilterCondition,
    #[serde(default)]
    pub operator: ChainOperator,
}

/// Stored filter: an ordered criterion chain evaluated left to right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub status: String,
    pub filter_criteria: Vec<FilterCriterion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
