//! CLI commands and argument parsing

use crate::description::{LOAD_CAMPAIGNS, LOAD_CUSTOM_FIELDS, LOAD_TAGS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GetResponse contacts connector
#[derive(Parser, Debug)]
#[command(name = "getresponse-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline configuration (YAML or JSON)
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the node description
    Describe,

    /// Validate the configuration
    Validate,

    /// List dropdown options from the account
    Options {
        /// Which options to load
        #[arg(value_enum)]
        kind: OptionKind,
    },

    /// Run the node over a parameter document
    Execute {
        /// Parameter file (JSON), or `-` for stdin
        #[arg(short, long)]
        params: String,

        /// Emit `{"error": ...}` for a failed item and keep going
        #[arg(long)]
        continue_on_fail: bool,
    },
}

/// Option lists the node can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OptionKind {
    Campaigns,
    Tags,
    CustomFields,
}

impl OptionKind {
    /// Loader method name as declared in the node description
    pub fn method_name(self) -> &'static str {
        match self {
            OptionKind::Campaigns => LOAD_CAMPAIGNS,
            OptionKind::Tags => LOAD_TAGS,
            OptionKind::CustomFields => LOAD_CUSTOM_FIELDS,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_execute() {
        let cli = Cli::try_parse_from([
            "getresponse-connector",
            "-c",
            "config.yaml",
            "execute",
            "--params",
            "-",
            "--continue-on-fail",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("config.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Execute {
                params,
                continue_on_fail,
            } => {
                assert_eq!(params, "-");
                assert!(continue_on_fail);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_options_kind() {
        let cli = Cli::try_parse_from(["getresponse-connector", "options", "custom-fields", "-f", "pretty"])
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Options { kind } => {
                assert_eq!(kind, OptionKind::CustomFields);
                assert_eq!(kind.method_name(), "getCustomFields");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_option_kind() {
        assert!(Cli::try_parse_from(["getresponse-connector", "options", "webforms"]).is_err());
    }
}
