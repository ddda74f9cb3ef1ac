//! Schema types

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An entity a dropdown can list by name and ID
pub trait NamedEntity {
    /// Label shown to the user
    fn name(&self) -> &str;
    /// Value stored in the parameter
    fn id(&self) -> &str;
}

/// Campaign (list) a contact belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub campaign_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<String>,
}

/// Contact tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub tag_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Account-level custom field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub custom_field_id: String,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl NamedEntity for Campaign {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.campaign_id
    }
}

impl NamedEntity for Tag {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.tag_id
    }
}

impl NamedEntity for CustomField {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.custom_field_id
    }
}

/// Decode a listing body into typed entities
pub fn decode_list<T: DeserializeOwned>(body: JsonValue, what: &str) -> Result<Vec<T>> {
    if !body.is_array() {
        return Err(Error::decode(format!("expected a list of {what}, got {body}")));
    }
    serde_json::from_value(body).map_err(|e| Error::decode(format!("invalid {what}: {e}")))
}
