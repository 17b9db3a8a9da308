//! Storage module.
//!
//! The engine treats persistence as a key-value store with get/put/update/scan
//! verbs; backends implement [`KeyValueStore`].

pub mod error;
pub mod memory;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

/// Logical table names used by the engine's services.
pub mod tables {
    pub const FLOW: &str = "flows";
    pub const FLOW_EXECUTION: &str = "flow_executions";
    pub const FILTER: &str = "filters";
    pub const TRANSFORMER: &str = "transformers";
    pub const ADAPTER: &str = "adapters";
    pub const OAUTH2_CREDENTIAL: &str = "oauth2_credentials";
    pub const OAUTH2_CONFIG: &str = "oauth2_configs";
}
