//! Integration flow execution engine.
//!
//! Moves business data between external ERPs through configurable flows:
//! a filter (admit/reject a payload), a transformer (remap JSON shape) and an
//! adapter (the authenticated remote action), with OAuth2 credential
//! management and an execution audit trail. Persistence is a pluggable
//! key-value store; HTTP routing and CRUD marshaling live outside this crate.

pub mod adapters;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use config::EngineConfig;
pub use error::EngineError;
pub use response::FlowResponse;
