//! Services module - engine business logic over the key-value store.

pub mod adapter_service;
pub mod credential_service;
pub mod filter_service;
pub mod flow_execution_service;
pub mod flow_service;
pub mod oauth_config_service;
pub mod oauth_service;
pub mod transformer_service;

pub use adapter_service::AdapterService;
pub use credential_service::CredentialService;
pub use filter_service::FilterService;
pub use flow_execution_service::FlowExecutionService;
pub use flow_service::FlowService;
pub use oauth_config_service::OAuthConfigService;
pub use oauth_service::{OAuth2Authenticator, TokenOutcome};
pub use transformer_service::TransformerService;
