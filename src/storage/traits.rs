//! Key-value storage trait consumed by the engine's services.

use serde_json::{Map, Value};

use super::StorageError;

/// Storage backend trait.
///
/// Records are JSON objects keyed by (table, key). `update` applies field
/// deltas to an existing record and returns the updated record; it fails with
/// `NotFound` when the key is absent, unlike `put` which overwrites.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a record, `None` when absent.
    async fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StorageError>;

    /// Insert or overwrite a record.
    async fn put(&self, table: &str, key: &str, record: Value) -> Result<(), StorageError>;

    /// Merge `deltas` into an existing record and return the result.
    async fn update(
        &self,
        table: &str,
        key: &str,
        deltas: Map<String, Value>,
    ) -> Result<Value, StorageError>;

    /// Return all records in a table. Callers filter in memory; the engine
    /// only scans small configuration tables and execution history.
    async fn scan(&self, table: &str) -> Result<Vec<Value>, StorageError>;
}
