//! Authenticator implementation
//!
//! Applies the configured credentials to request builders.

use super::types::AuthConfig;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// Header carrying the account API key
pub const API_KEY_HEADER: &str = "X-Auth-Token";

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::ApiKey { api_key } => {
                if api_key.is_empty() {
                    return Err(Error::auth("API key is empty"));
                }
                Ok(req.header(API_KEY_HEADER, format!("api-key {api_key}")))
            }

            AuthConfig::OAuth2 { access_token } => {
                if access_token.is_empty() {
                    return Err(Error::auth("OAuth2 access token is empty"));
                }
                Ok(req.bearer_auth(access_token))
            }
        }
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
