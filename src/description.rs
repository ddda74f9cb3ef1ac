//! Node description
//!
//! Declarative metadata a host uses to render the node: its properties,
//! their defaults, when each is shown, and which dropdowns are filled by an
//! option loader. Parameter defaults are resolved from here as well.

use crate::types::JsonValue;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Option loader for campaign dropdowns
pub const LOAD_CAMPAIGNS: &str = "getCampaigns";
/// Option loader for tag dropdowns
pub const LOAD_TAGS: &str = "getTags";
/// Option loader for custom field dropdowns
pub const LOAD_CUSTOM_FIELDS: &str = "getCustomFields";

// ============================================================================
// Description Types
// ============================================================================

/// Complete node description
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub version: u32,
    pub description: String,
    /// Credential types, keyed by the `authentication` value that selects them
    pub credentials: BTreeMap<String, String>,
    pub properties: Vec<NodeProperty>,
}

/// Kind of input a property renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Options,
    MultiOptions,
    DateTime,
    Collection,
    FixedCollection,
}

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyOption {
    pub name: String,
    pub value: JsonValue,
}

impl PropertyOption {
    fn new(name: &str, value: impl Into<JsonValue>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Visibility conditions; a property is shown when every listed key matches
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operation: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub return_all: Vec<bool>,
}

/// Numeric bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    pub min_value: u32,
    pub max_value: u32,
}

/// One node property
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub default: JsonValue,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_options_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    /// Nested properties of a collection
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<NodeProperty>,
}

impl NodeProperty {
    fn new(display_name: &str, name: &str, kind: PropertyType, default: JsonValue) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind,
            default,
            required: false,
            description: None,
            display_options: None,
            options: Vec::new(),
            load_options_method: None,
            type_options: None,
            values: Vec::new(),
        }
    }

    fn string(display_name: &str, name: &str) -> Self {
        Self::new(display_name, name, PropertyType::String, json!(""))
    }

    fn date(display_name: &str, name: &str) -> Self {
        Self::new(display_name, name, PropertyType::DateTime, json!(""))
    }

    fn collection(display_name: &str, name: &str, values: Vec<NodeProperty>) -> Self {
        let mut property = Self::new(display_name, name, PropertyType::Collection, json!({}));
        property.values = values;
        property
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn show_for(mut self, operations: &[&str]) -> Self {
        self.display_options = Some(DisplayOptions {
            resource: vec!["contact".to_string()],
            operation: operations.iter().map(|op| op.to_string()).collect(),
            return_all: Vec::new(),
        });
        self
    }

    fn options(mut self, options: Vec<PropertyOption>) -> Self {
        self.options = options;
        self
    }

    fn load_from(mut self, method: &str) -> Self {
        self.load_options_method = Some(method.to_string());
        self
    }

    /// Whether this property is visible for an operation
    pub fn shown_for(&self, operation: Option<&str>) -> bool {
        match (&self.display_options, operation) {
            (Some(display), Some(op)) if !display.operation.is_empty() => {
                display.operation.iter().any(|o| o == op)
            }
            _ => true,
        }
    }
}

// ============================================================================
// GetResponse Description
// ============================================================================

impl NodeDescription {
    /// Description of the GetResponse node
    pub fn getresponse() -> Self {
        let mut credentials = BTreeMap::new();
        credentials.insert("apiKey".to_string(), "getResponseApi".to_string());
        credentials.insert("oAuth2".to_string(), "getResponseOAuth2Api".to_string());

        let mut properties = vec![
            NodeProperty::new(
                "Authentication",
                "authentication",
                PropertyType::Options,
                json!("apiKey"),
            )
            .options(vec![
                PropertyOption::new("API Key", "apiKey"),
                PropertyOption::new("OAuth2", "oAuth2"),
            ]),
            NodeProperty::new("Resource", "resource", PropertyType::Options, json!("contact"))
                .options(vec![PropertyOption::new("Contact", "contact")])
                .describe("The resource to operate on"),
            NodeProperty::new("Operation", "operation", PropertyType::Options, json!("get"))
                .options(vec![
                    PropertyOption::new("Create", "create"),
                    PropertyOption::new("Delete", "delete"),
                    PropertyOption::new("Get", "get"),
                    PropertyOption::new("Get All", "getAll"),
                    PropertyOption::new("Update", "update"),
                ])
                .describe("The operation to perform"),
        ];
        properties.extend(contact_fields());

        Self {
            display_name: "GetResponse".to_string(),
            name: "getResponse".to_string(),
            version: 1,
            description: "Consume GetResponse API".to_string(),
            credentials,
            properties,
        }
    }

    /// Top-level property by name, visible for `operation` when given
    pub fn property(&self, name: &str, operation: Option<&str>) -> Option<&NodeProperty> {
        self.properties
            .iter()
            .find(|p| p.name == name && p.shown_for(operation))
    }

    /// Declared default of a top-level property
    pub fn default_for(&self, name: &str, operation: Option<&str>) -> Option<&JsonValue> {
        self.property(name, operation).map(|p| &p.default)
    }
}

fn custom_fields_ui() -> NodeProperty {
    let mut values = NodeProperty::collection(
        "Custom Field",
        "customFieldValues",
        vec![
            NodeProperty::new("Field ID", "customFieldId", PropertyType::Options, json!(""))
                .load_from(LOAD_CUSTOM_FIELDS)
                .describe("The ID of the field to set"),
            NodeProperty::string("Value", "value").describe("The value to set on the field"),
        ],
    );
    values.default = json!([]);

    let mut ui = NodeProperty::new(
        "Custom Fields",
        "customFieldsUi",
        PropertyType::FixedCollection,
        json!({}),
    );
    ui.values = vec![values];
    ui
}

/// Fields shared by contact create and update
fn contact_body_fields() -> Vec<NodeProperty> {
    vec![
        custom_fields_ui(),
        NodeProperty::string("Day Of Cycle", "dayOfCycle")
            .describe("Position of the contact in the autoresponder cycle"),
        NodeProperty::string("IP Address", "ipAddress"),
        NodeProperty::string("Name", "name"),
        NodeProperty::string("Note", "note"),
        NodeProperty::new("Scoring", "scoring", PropertyType::Number, json!(0)),
        NodeProperty::new("Tag IDs", "tags", PropertyType::MultiOptions, json!([]))
            .load_from(LOAD_TAGS),
    ]
}

fn contact_fields() -> Vec<NodeProperty> {
    let mut update_fields = contact_body_fields();
    update_fields.push(
        NodeProperty::new("Campaign ID", "campaignId", PropertyType::Options, json!(""))
            .load_from(LOAD_CAMPAIGNS),
    );
    update_fields.push(NodeProperty::string("Email", "email"));

    let mut limit = NodeProperty::new("Limit", "limit", PropertyType::Number, json!(50))
        .describe("How many results to return");
    limit.type_options = Some(TypeOptions {
        min_value: 1,
        max_value: 1000,
    });
    limit.display_options = Some(DisplayOptions {
        resource: vec!["contact".to_string()],
        operation: vec!["getAll".to_string()],
        return_all: vec![false],
    });

    vec![
        // create
        NodeProperty::string("Email", "email")
            .required()
            .show_for(&["create"]),
        NodeProperty::new("Campaign ID", "campaignId", PropertyType::Options, json!(""))
            .required()
            .load_from(LOAD_CAMPAIGNS)
            .show_for(&["create"]),
        NodeProperty::collection("Additional Fields", "additionalFields", contact_body_fields())
            .show_for(&["create"]),
        // delete, get, update
        NodeProperty::string("Contact ID", "contactId")
            .required()
            .describe("ID of the contact")
            .show_for(&["delete", "get", "update"]),
        NodeProperty::collection(
            "Options",
            "options",
            vec![
                NodeProperty::string("IP Address", "ipAddress")
                    .describe("Address the unsubscription was made from"),
                NodeProperty::string("Message ID", "messageId")
                    .describe("Message the unsubscription came from"),
            ],
        )
        .show_for(&["delete"]),
        NodeProperty::collection(
            "Options",
            "options",
            vec![NodeProperty::string("Fields", "fields")
                .describe("Comma-separated list of fields to return")],
        )
        .show_for(&["get"]),
        // getAll
        NodeProperty::new("Return All", "returnAll", PropertyType::Boolean, json!(false))
            .describe("Whether to return all results or only up to a given limit")
            .show_for(&["getAll"]),
        limit,
        NodeProperty::collection("Options", "options", list_options()).show_for(&["getAll"]),
        // update
        NodeProperty::collection("Update Fields", "updateFields", update_fields)
            .show_for(&["update"]),
    ]
}

fn list_options() -> Vec<NodeProperty> {
    let sort_fields = ["campaignId", "changedOn", "createdOn", "email"]
        .iter()
        .map(|field| PropertyOption::new(field, *field))
        .collect();

    vec![
        NodeProperty::string("Campaign ID", "campaignId")
            .describe("Search contacts by campaign ID"),
        NodeProperty::date("Change On From", "changeOnFrom"),
        NodeProperty::date("Change On To", "changeOnTo"),
        NodeProperty::date("Created On From", "createdOnFrom"),
        NodeProperty::date("Created On To", "createdOnTo"),
        NodeProperty::string("Email", "email").describe("Search contacts by email"),
        NodeProperty::new("Exact Match", "exactMatch", PropertyType::Boolean, json!(false))
            .describe("Match the search values exactly instead of by prefix"),
        NodeProperty::string("Fields", "fields")
            .describe("Comma-separated list of fields to return"),
        NodeProperty::string("Name", "name").describe("Search contacts by name"),
        NodeProperty::new("Origin", "origin", PropertyType::Options, json!(""))
            .options(
                [
                    "api", "copy", "forward", "import", "iphone", "landing_page", "leads",
                    "panel", "sale", "survey", "webinar", "www",
                ]
                .iter()
                .map(|origin| PropertyOption::new(origin, *origin))
                .collect(),
            )
            .describe("Search contacts by origin"),
        NodeProperty::new("Sort By", "sortBy", PropertyType::Options, json!(""))
            .options(sort_fields),
        NodeProperty::new("Sort Order", "sortOrder", PropertyType::Options, json!("ASC"))
            .options(vec![
                PropertyOption::new("ASC", "ASC"),
                PropertyOption::new("DESC", "DESC"),
            ]),
    ]
}
