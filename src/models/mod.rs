// Models module - record types persisted in the key-value store.

pub mod adapter;
pub mod filter;
pub mod flow;
pub mod oauth;
pub mod transformer;

pub use adapter::{Adapter, AdapterAction};
pub use filter::{ChainOperator, FilterCondition, FilterCriterion, FilterDefinition};
pub use flow::{ExecutionStatus, Flow, FlowExecution, FlowStep};
pub use oauth::{OAuth2Config, OAuth2Credential, TokenResponse};
pub use transformer::Transformer;
