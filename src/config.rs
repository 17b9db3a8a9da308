//! Static engine configuration, built once at process start.

use std::env;

/// Configuration for outbound adapter and authorization-server calls.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the NetSuite REST surface.
    pub netsuite_base_url: String,
    /// Skip TLS certificate verification on token-endpoint calls.
    /// Defaults to false; only enable against test authorization servers.
    pub accept_invalid_certs: bool,
}

impl EngineConfig {
    pub fn new(netsuite_base_url: impl Into<String>) -> Self {
        Self {
            netsuite_base_url: netsuite_base_url.into(),
            accept_invalid_certs: false,
        }
    }

    /// Read configuration from the environment.
    ///
    /// `NETSUITE_BASE_URL` is required at deploy time but defaults to empty
    /// so library consumers can construct configs explicitly.
    /// `OAUTH_ACCEPT_INVALID_CERTS=true` opts into insecure TLS.
    pub fn from_env() -> Self {
        Self {
            netsuite_base_url: env::var("NETSUITE_BASE_URL").unwrap_or_default(),
            accept_invalid_certs: env::var("OAUTH_ACCEPT_INVALID_CERTS")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}
