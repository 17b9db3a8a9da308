//! Engine error types.
//!
//! Hard errors only. Expected pipeline outcomes (not-found, filter rejection,
//! remote non-2xx responses) travel as [`crate::response::FlowResponse`]
//! values; everything here aborts the run and propagates to the caller.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A mapping expression is not a valid path expression. Distinct from
    /// "path not found in payload", which yields null for that field.
    #[error("Malformed mapping expression: {expression}")]
    MalformedMapping { expression: String },

    /// Token endpoint answered 200 but the body lacks a required field.
    #[error("Token response missing field: {0}")]
    MalformedTokenResponse(&'static str),

    /// Operator-authored definition is structurally unusable (e.g. a flow
    /// with an empty flowstep list). Not recoverable at runtime.
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
