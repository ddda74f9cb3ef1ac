//! Connector configuration
//!
//! The host driver reads one `ConnectorConfig` from a YAML (or JSON) file:
//! where the API lives, which credentials to inject, transport tuning and
//! pagination limits. Secrets may reference environment variables with
//! `${NAME}` so the file itself can be committed.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Production endpoint of the GetResponse v3 API
pub const DEFAULT_BASE_URL: &str = "https://api.getresponse.com/v3";

/// Page size used when every contact is requested
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Upper bound on pages fetched by a single "return all" listing
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete connector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Credentials injected into every request
    pub auth: AuthConfigDef,

    /// HTTP transport configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Pagination limits for listing operations
    #[serde(default)]
    pub pagination: PaginationSettings,

    /// IANA timezone used to interpret date filters (e.g. "Europe/Berlin")
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

// ============================================================================
// Auth Definition
// ============================================================================

/// Credentials as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfigDef {
    /// Account API key, sent as `X-Auth-Token: api-key <key>`
    ApiKey {
        /// The API key (or `${ENV_VAR}` reference)
        api_key: String,
    },

    /// OAuth2 access token obtained by the host
    Oauth2 {
        /// The access token (or `${ENV_VAR}` reference)
        access_token: String,
    },
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Client-side rate limit; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_rate_limit() -> Option<RateLimitConfig> {
    Some(RateLimitConfig::default())
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rps(),
            burst_size: default_burst(),
        }
    }
}

fn default_rps() -> u32 {
    10
}

fn default_burst() -> u32 {
    10
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Limits for "return all" listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Items requested per page while iterating
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum number of pages; `null` removes the cap
    #[serde(default = "default_max_pages")]
    pub max_pages: Option<u32>,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_pages() -> Option<u32> {
    Some(DEFAULT_MAX_PAGES)
}

// ============================================================================
// Loading
// ============================================================================

/// Load a connector config from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<ConnectorConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a connector config from a YAML (or JSON) string
pub fn load_config_from_str(content: &str) -> Result<ConnectorConfig> {
    let mut config: ConnectorConfig = serde_yaml::from_str(content)
        .map_err(|e| Error::config(format!("Failed to parse connector config: {e}")))?;

    config.resolve_secrets()?;
    config.validate()?;
    Ok(config)
}

impl ConnectorConfig {
    /// Create a config for the given credentials with default settings
    pub fn new(auth: AuthConfigDef) -> Self {
        Self {
            base_url: default_base_url(),
            auth,
            http: HttpConfig::default(),
            pagination: PaginationSettings::default(),
            timezone: default_timezone(),
        }
    }

    /// Point the connector at a different API root
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&self.base_url)?;

        match &self.auth {
            AuthConfigDef::ApiKey { api_key } if api_key.trim().is_empty() => {
                return Err(Error::missing_field("auth.api_key"));
            }
            AuthConfigDef::Oauth2 { access_token } if access_token.trim().is_empty() => {
                return Err(Error::missing_field("auth.access_token"));
            }
            _ => {}
        }

        if self.pagination.page_size == 0 {
            return Err(Error::config("pagination.page_size must be at least 1"));
        }
        if self.pagination.max_pages == Some(0) {
            return Err(Error::config("pagination.max_pages must be at least 1"));
        }

        self.tz()?;
        Ok(())
    }

    /// Parsed timezone
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Build the transport configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.http.timeout_seconds));

        match &self.http.rate_limit {
            Some(limit) => builder
                .rate_limit(RateLimiterConfig::new(
                    limit.requests_per_second,
                    limit.burst_size,
                ))
                .build(),
            None => builder.no_rate_limit().build(),
        }
    }

    /// Build the runtime auth configuration
    pub fn auth_config(&self) -> AuthConfig {
        match &self.auth {
            AuthConfigDef::ApiKey { api_key } => AuthConfig::ApiKey {
                api_key: api_key.clone(),
            },
            AuthConfigDef::Oauth2 { access_token } => AuthConfig::OAuth2 {
                access_token: access_token.clone(),
            },
        }
    }

    fn resolve_secrets(&mut self) -> Result<()> {
        match &mut self.auth {
            AuthConfigDef::ApiKey { api_key } => *api_key = resolve_env_ref(api_key)?,
            AuthConfigDef::Oauth2 { access_token } => {
                *access_token = resolve_env_ref(access_token)?;
            }
        }
        Ok(())
    }
}

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| Error::InvalidTimezone {
        name: name.to_string(),
    })
}

/// Replace a whole-value `${NAME}` reference with the variable's value
fn resolve_env_ref(value: &str) -> Result<String> {
    match value
        .trim()
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(name) => std::env::var(name).map_err(|_| {
            Error::config(format!("Environment variable '{name}' is not set"))
        }),
        None => Ok(value.to_string()),
    }
}
