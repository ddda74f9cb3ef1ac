//! Authentication module
//!
//! Supports: GetResponse API key, OAuth2 access token
//!
//! Credentials are obtained and stored by the host; the `Authenticator`
//! only places them on outgoing requests.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, API_KEY_HEADER};
pub use types::AuthConfig;

#[cfg(test)]
mod tests;
