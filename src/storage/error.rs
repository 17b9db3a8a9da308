//! Storage error types for the key-value backends.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageError {
    /// Record not found
    #[error("Record not found: {table} with key {key}")]
    NotFound { table: String, key: String },
    /// Record could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// General storage error
    #[error("Storage error: {0}")]
    Other(String),
}
