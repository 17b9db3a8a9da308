//! OAuth2 token authenticator.
//!
//! Stateless client for one authorization server: builds authorization URLs
//! and exchanges authorization codes / refresh tokens for access tokens.
//! Success is exactly HTTP 200; any other status is handed back verbatim for
//! the caller to interpret.

use tracing::info;

use crate::error::EngineError;
use crate::models::{OAuth2Config, TokenResponse};

/// Outcome of a token-endpoint exchange.
#[derive(Debug)]
pub enum TokenOutcome {
    Granted(TokenResponse),
    /// Non-200 answer from the authorization server, passed through verbatim.
    Denied { status: u16, body: String },
}

pub struct OAuth2Authenticator {
    config: OAuth2Config,
    http: reqwest::Client,
}

impl OAuth2Authenticator {
    /// Build an authenticator for one client config.
    ///
    /// Redirect following is disabled: token endpoints must answer directly,
    /// and a redirect would leak credentials to a third party.
    /// `accept_invalid_certs` must stay off outside test authorization
    /// servers.
    pub fn new(config: OAuth2Config, accept_invalid_certs: bool) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self { config, http })
    }

    /// Deterministic authorization-code redirect URL.
    ///
    /// `state` is the config-supplied anti-CSRF value; callers wanting a
    /// per-request random state store it on the config before use.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}?response_type={}&client_id={}&redirect_uri={}&scope={}&state={}",
            self.config.authorize_url,
            urlencoding::encode(&self.config.response_type),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.callback_uri),
            urlencoding::encode(&self.config.scope),
            urlencoding::encode(&self.config.state),
        )
    }

    /// Exchange an authorization code for a token pair.
    pub async fn grant_app_login(&self, auth_code: &str) -> Result<TokenOutcome, EngineError> {
        info!(token_url = %self.config.token_url, "Exchanging authorization code for tokens");
        let params = [
            ("grant_type", "authorization_code"),
            ("code", auth_code),
            ("redirect_uri", self.config.callback_uri.as_str()),
        ];
        self.exchange(&self.config.token_url, &params).await
    }

    /// Exchange a refresh token for a new access token.
    pub async fn get_new_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenOutcome, EngineError> {
        info!(
            refresh_token_url = %self.config.refresh_token_url,
            "Requesting new access token with refresh token"
        );
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        self.exchange(&self.config.refresh_token_url, &params).await
    }

    async fn exchange(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<TokenOutcome, EngineError> {
        let response = self
            .http
            .post(url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(params)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if status != 200 {
            info!(status, "Token exchange failed");
            return Ok(TokenOutcome::Denied { status, body });
        }

        let tokens: TokenResponse = serde_json::from_str(&body)?;
        Ok(TokenOutcome::Granted(tokens))
    }
}
