//! Auth configuration types
//!
//! These types represent the runtime auth configuration after secrets
//! have been resolved from the connector config.

use std::fmt;

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication (tests and local mocks)
    #[default]
    None,

    /// GetResponse account API key
    ApiKey {
        /// The API key value
        api_key: String,
    },

    /// OAuth2 access token issued to the host
    OAuth2 {
        /// The bearer token
        access_token: String,
    },
}

impl AuthConfig {
    /// Name of the scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::OAuth2 { .. } => "oauth2",
        }
    }
}

// Secrets stay out of Debug output.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("scheme", &self.scheme())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
        assert_eq!(config.scheme(), "none");
    }

    #[test]
    fn test_auth_config_debug_hides_secret() {
        let config = AuthConfig::ApiKey {
            api_key: "super-secret".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("api_key"));
        assert!(!debug.contains("super-secret"));
    }
}
