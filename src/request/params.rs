//! Host parameter source
//!
//! The host resolves user-configured parameters per input item. The
//! `NodeParameters` trait is that contract; `ParameterSet` is the JSON-backed
//! implementation the CLI host and tests use.

use crate::description::NodeDescription;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, OptionStringExt};
use serde::{Deserialize, Serialize};

/// Typed parameter lookup by name and item index
pub trait NodeParameters: Send + Sync {
    /// Number of input items to process
    fn item_count(&self) -> usize;

    /// Value of a parameter for one item, if set
    fn parameter(&self, name: &str, item: usize) -> Option<&JsonValue>;

    /// IANA timezone of the host workflow, if it overrides the connector's
    fn timezone(&self) -> Option<&str> {
        None
    }
}

/// Parameters from a JSON document: node-level values plus per-item overrides
///
/// ```json
/// {
///   "parameters": {"resource": "contact", "operation": "get"},
///   "items": [{"contactId": "abc"}, {"contactId": "def"}],
///   "timezone": "Europe/Berlin"
/// }
/// ```
///
/// Lookup order is item override, node-level value, then the property default
/// declared in the node description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Values shared by every item
    #[serde(default)]
    pub parameters: JsonObject,

    /// Per-item overrides; an empty list means one item
    #[serde(default)]
    pub items: Vec<JsonObject>,

    /// Workflow timezone
    #[serde(default)]
    pub timezone: Option<String>,

    #[serde(skip, default = "NodeDescription::getresponse")]
    description: NodeDescription,
}

impl ParameterSet {
    /// Create a parameter set from node-level values
    pub fn new(parameters: JsonObject) -> Self {
        Self {
            parameters,
            items: Vec::new(),
            timezone: None,
            description: NodeDescription::getresponse(),
        }
    }

    /// Parse a parameter set from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Add one input item with its overrides
    #[must_use]
    pub fn with_item(mut self, overrides: JsonObject) -> Self {
        self.items.push(overrides);
        self
    }

    /// Set the workflow timezone
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new(JsonObject::new())
    }
}

impl NodeParameters for ParameterSet {
    fn item_count(&self) -> usize {
        self.items.len().max(1)
    }

    fn parameter(&self, name: &str, item: usize) -> Option<&JsonValue> {
        self.items
            .get(item)
            .and_then(|overrides| overrides.get(name))
            .or_else(|| self.parameters.get(name))
            .or_else(|| {
                let operation = self
                    .items
                    .get(item)
                    .and_then(|o| o.get("operation"))
                    .or_else(|| self.parameters.get("operation"))
                    .and_then(JsonValue::as_str);
                self.description.default_for(name, operation)
            })
            .filter(|value| !value.is_null())
    }

    fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }
}

// ============================================================================
// Typed accessors
// ============================================================================

/// Required, non-empty string parameter
pub(crate) fn required_str(
    params: &dyn NodeParameters,
    name: &str,
    item: usize,
) -> Result<String> {
    match params.parameter(name, item) {
        Some(JsonValue::String(s)) => s
            .trim()
            .to_string()
            .none_if_empty()
            .ok_or_else(|| Error::missing_param(name, item)),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(Error::invalid_param(
            name,
            format!("expected a string, got {other}"),
        )),
        None => Err(Error::missing_param(name, item)),
    }
}

/// Optional object parameter; absent means empty
pub(crate) fn object(params: &dyn NodeParameters, name: &str, item: usize) -> Result<JsonObject> {
    match params.parameter(name, item) {
        Some(JsonValue::Object(map)) => Ok(map.clone()),
        Some(other) => Err(Error::invalid_param(
            name,
            format!("expected an object, got {other}"),
        )),
        None => Ok(JsonObject::new()),
    }
}

/// Boolean parameter with a fallback
pub(crate) fn bool_or(
    params: &dyn NodeParameters,
    name: &str,
    item: usize,
    default: bool,
) -> Result<bool> {
    match params.parameter(name, item) {
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(JsonValue::String(s)) if s == "true" || s == "false" => Ok(s == "true"),
        Some(other) => Err(Error::invalid_param(
            name,
            format!("expected a boolean, got {other}"),
        )),
        None => Ok(default),
    }
}

/// Positive integer parameter with a fallback
pub(crate) fn u32_or(
    params: &dyn NodeParameters,
    name: &str,
    item: usize,
    default: u32,
) -> Result<u32> {
    let invalid = |value: &JsonValue| {
        Error::invalid_param(name, format!("expected a positive integer, got {value}"))
    };

    let parsed = match params.parameter(name, item) {
        None => return Ok(default),
        Some(value @ JsonValue::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .ok_or_else(|| invalid(value))?,
        Some(value @ JsonValue::String(s)) => s.trim().parse().map_err(|_| invalid(value))?,
        Some(value) => return Err(invalid(value)),
    };

    match u32::try_from(parsed) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::invalid_param(
            name,
            format!("must be between 1 and {}, got {parsed}", u32::MAX),
        )),
    }
}
