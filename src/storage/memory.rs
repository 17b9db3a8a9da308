//! In-memory storage backend.
//!
//! Default backend for tests and single-process deployments. Individual
//! operations are serialized through an RwLock; there is no cross-operation
//! transaction, matching the key-value contract.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// In-memory key-value store: table name -> key -> record.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.get(table).and_then(|t| t.get(key)).cloned())
    }

    async fn put(&self, table: &str, key: &str, record: Value) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        key: &str,
        deltas: Map<String, Value>,
    ) -> Result<Value, StorageError> {
        let mut tables = self.tables.write().await;
        let record = tables
            .get_mut(table)
            .and_then(|t| t.get_mut(key))
            .ok_or_else(|| StorageError::NotFound {
                table: table.to_string(),
                key: key.to_string(),
            })?;
        let obj = record.as_object_mut().ok_or_else(|| {
            StorageError::Serialization(format!("record {table}/{key} is not a JSON object"))
        })?;
        for (field, value) in deltas {
            obj.insert(field, value);
        }
        Ok(record.clone())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Value>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default())
    }
}
