//! CLI module
//!
//! Command-line host for the GetResponse node.
//!
//! # Commands
//!
//! - `describe` - Print the node description
//! - `validate` - Load and validate the configuration
//! - `options` - List campaigns, tags or custom fields
//! - `execute` - Run the node over a parameter document

mod commands;
mod runner;

pub use commands::{Cli, Commands, OptionKind, OutputFormat};
pub use runner::Runner;
