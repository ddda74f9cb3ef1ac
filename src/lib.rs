// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # GetResponse Connector
//!
//! Contacts connector for the GetResponse v3 API: create, get, list, update
//! and delete contacts, driven by host-supplied node parameters.
//!
//! ## Features
//!
//! - **Request Builder**: Maps operations to method, path, body and query
//! - **Query Translation**: Filter, date-range and sort options to `query[...]` keys
//! - **Custom Fields**: Host collection reshaped to `customFieldValues`
//! - **Pagination**: `page`/`perPage` listing with a page cap
//! - **Option Loaders**: Campaigns, tags and custom fields for dropdowns
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use getresponse_connector::{AuthConfigDef, ConnectorConfig, GetResponseNode, ParameterSet};
//!
//! #[tokio::main]
//! async fn main() -> getresponse_connector::Result<()> {
//!     let config = ConnectorConfig::new(AuthConfigDef::ApiKey {
//!         api_key: "...".to_string(),
//!     });
//!     let node = GetResponseNode::from_config(&config)?;
//!
//!     let params = ParameterSet::from_json(
//!         r#"{"parameters": {"resource": "contact", "operation": "getAll", "returnAll": true}}"#,
//!     )?;
//!     for contact in node.execute(&params).await? {
//!         println!("{contact}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │        GetResponseNode::execute(params) → Vec<JsonValue>      │
//! └───────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┼───────────────┬────────────────┐
//! │ Description │    Request     │  Pagination   │      HTTP      │
//! ├─────────────┼────────────────┼───────────────┼────────────────┤
//! │ Properties  │ Operations     │ Page Number   │ Auth headers   │
//! │ Defaults    │ Query rewrite  │ Single Page   │ Error mapping  │
//! │ Loaders     │ Custom fields  │ Page cap      │ Rate Limit     │
//! └─────────────┴────────────────┴───────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Connector configuration
pub mod config;

/// Node description and parameter defaults
pub mod description;

/// Operations and request construction
pub mod request;

/// Pagination strategies and the paginated fetcher
pub mod pagination;

/// Typed response schemas
pub mod schema;

/// Node execution and option loaders
pub mod node;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, AuthConfigDef, ConnectorConfig};
pub use description::NodeDescription;
pub use node::{GetResponseNode, NodeOption};
pub use request::{build_request, NodeParameters, Operation, ParameterSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
