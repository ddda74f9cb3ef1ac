//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OptionKind, OutputFormat};
use crate::config::{load_config, load_config_from_str, ConnectorConfig};
use crate::description::NodeDescription;
use crate::error::{Error, Result, ResultExt};
use crate::node::GetResponseNode;
use crate::request::{NodeParameters, ParameterSet};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::time::Instant;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Describe => self.describe(),
            Commands::Validate => self.validate(),
            Commands::Options { kind } => self.options(*kind).await,
            Commands::Execute {
                params,
                continue_on_fail,
            } => self.execute(params, *continue_on_fail).await,
        }
    }

    /// Load the connector configuration from `--config-json` or `--config`
    fn load_config(&self) -> Result<ConnectorConfig> {
        if let Some(inline) = &self.cli.config_json {
            return load_config_from_str(inline);
        }
        let path = self.cli.config.as_ref().ok_or_else(|| {
            Error::config("Configuration not specified (use -c or --config-json)")
        })?;
        load_config(path)
    }

    fn node(&self) -> Result<GetResponseNode> {
        GetResponseNode::from_config(&self.load_config()?)
    }

    /// Print the node description
    fn describe(&self) -> Result<()> {
        self.output_value(&NodeDescription::getresponse());
        Ok(())
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;

        self.output_value(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Configuration is valid ({} auth, base URL {}, timezone {})",
                    config.auth_config().scheme(),
                    config.base_url,
                    config.timezone
                )
            }
        }));

        Ok(())
    }

    /// List dropdown options
    async fn options(&self, kind: OptionKind) -> Result<()> {
        let node = self.node()?;
        let options = node.load_options(kind.method_name()).await?;
        info!("Loaded {} options via {}", options.len(), kind.method_name());

        let values = options
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.output_items(&values);
        Ok(())
    }

    /// Run the node over a parameter document
    async fn execute(&self, params_source: &str, continue_on_fail: bool) -> Result<()> {
        let start = Instant::now();
        let params = ParameterSet::from_json(&read_params(params_source)?)?;
        let node = self.node()?;

        let output = execute_items(&node, &params, continue_on_fail).await?;
        info!(
            "Execution finished: {} output items in {}ms",
            output.len(),
            start.elapsed().as_millis()
        );

        self.output_items(&output);
        Ok(())
    }

    /// Print output items
    fn output_items(&self, items: &[Value]) {
        match self.cli.format {
            OutputFormat::Json => {
                for item in items {
                    println!("{}", serde_json::to_string(item).unwrap_or_default());
                }
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
            }
        }
    }

    /// Print a single document
    fn output_value<T: Serialize>(&self, value: &T) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// Read parameter JSON from a file, or stdin for `-`
fn read_params(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read parameters from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(source)
        .with_context(|| format!("Failed to read parameter file '{source}'"))
}

/// Run every item; with `continue_on_fail` a failed item becomes `{"error": ...}`
pub(crate) async fn execute_items(
    node: &GetResponseNode,
    params: &dyn NodeParameters,
    continue_on_fail: bool,
) -> Result<Vec<Value>> {
    if !continue_on_fail {
        return node.execute(params).await;
    }

    let mut output = Vec::new();
    for item in 0..params.item_count() {
        match node.execute_item(params, item).await {
            Ok(items) => output.extend(items),
            Err(e) => {
                warn!("Item {item} failed: {e}");
                output.push(json!({ "error": e.to_string() }));
            }
        }
    }
    Ok(output)
}
