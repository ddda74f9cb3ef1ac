//! Operation and request descriptor types

use super::params::{self, NodeParameters};
use super::query::QueryParams;
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::types::{JsonObject, JsonValue, Method};
use std::fmt;
use std::str::FromStr;

/// Default number of contacts returned when "return all" is off
pub const DEFAULT_LIMIT: u32 = 50;

// ============================================================================
// Resource
// ============================================================================

/// API entity type an operation acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Contact,
}

impl Resource {
    /// Tag used by the host for this resource
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Contact => "contact",
        }
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contact" => Ok(Resource::Contact),
            other => Err(Error::unsupported(other, "*")),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Every supported resource/operation pair with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Contact(ContactOperation),
}

/// Contact operations
#[derive(Debug, Clone, PartialEq)]
pub enum ContactOperation {
    /// Subscribe a new contact to a campaign
    Create(CreateContact),
    /// Remove a contact
    Delete {
        contact_id: String,
        /// Sent verbatim as query parameters (`ipAddress`, `messageId`)
        options: JsonObject,
    },
    /// Fetch one contact
    Get {
        contact_id: String,
        /// Sent verbatim as query parameters (`fields`)
        options: JsonObject,
    },
    /// List contacts
    GetAll(ListContacts),
    /// Update an existing contact
    Update {
        contact_id: String,
        update_fields: JsonObject,
    },
}

/// Parameters of a contact creation
#[derive(Debug, Clone, PartialEq)]
pub struct CreateContact {
    pub email: String,
    pub campaign_id: String,
    pub additional_fields: JsonObject,
}

/// Parameters of a contact listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListContacts {
    /// Follow pages until the last one
    pub return_all: bool,
    /// Page size when `return_all` is false
    pub limit: u32,
    /// Raw filter/sort options, translated by `translate_list_options`
    pub options: JsonObject,
}

impl Operation {
    /// Resolve the operation for one input item
    pub fn from_parameters(params: &dyn NodeParameters, item: usize) -> Result<Self> {
        let resource = params::required_str(params, "resource", item)?;
        let operation = params::required_str(params, "operation", item)?;

        let resource: Resource = resource
            .parse()
            .map_err(|_| Error::unsupported(&resource, &operation))?;

        match resource {
            Resource::Contact => {
                ContactOperation::from_parameters(&operation, params, item).map(Self::Contact)
            }
        }
    }

    /// Resource this operation targets
    pub fn resource(&self) -> Resource {
        match self {
            Operation::Contact(_) => Resource::Contact,
        }
    }

    /// Operation tag as the host names it
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Contact(op) => op.name(),
        }
    }

    /// How the API response becomes output items
    pub fn response_shape(&self) -> ResponseShape {
        match self {
            Operation::Contact(ContactOperation::Create(_) | ContactOperation::Delete { .. }) => {
                ResponseShape::SuccessMarker
            }
            Operation::Contact(ContactOperation::GetAll(_)) => ResponseShape::List,
            Operation::Contact(ContactOperation::Get { .. } | ContactOperation::Update { .. }) => {
                ResponseShape::Single
            }
        }
    }
}

impl ContactOperation {
    fn from_parameters(operation: &str, params: &dyn NodeParameters, item: usize) -> Result<Self> {
        match operation {
            "create" => Ok(Self::Create(CreateContact {
                email: params::required_str(params, "email", item)?,
                campaign_id: params::required_str(params, "campaignId", item)?,
                additional_fields: params::object(params, "additionalFields", item)?,
            })),
            "delete" => Ok(Self::Delete {
                contact_id: params::required_str(params, "contactId", item)?,
                options: params::object(params, "options", item)?,
            }),
            "get" => Ok(Self::Get {
                contact_id: params::required_str(params, "contactId", item)?,
                options: params::object(params, "options", item)?,
            }),
            "getAll" => Ok(Self::GetAll(ListContacts {
                return_all: params::bool_or(params, "returnAll", item, false)?,
                limit: params::u32_or(params, "limit", item, DEFAULT_LIMIT)?,
                options: params::object(params, "options", item)?,
            })),
            "update" => Ok(Self::Update {
                contact_id: params::required_str(params, "contactId", item)?,
                update_fields: params::object(params, "updateFields", item)?,
            }),
            other => Err(Error::unsupported(Resource::Contact.as_str(), other)),
        }
    }

    /// Operation tag as the host names it
    pub fn name(&self) -> &'static str {
        match self {
            ContactOperation::Create(_) => "create",
            ContactOperation::Delete { .. } => "delete",
            ContactOperation::Get { .. } => "get",
            ContactOperation::GetAll(_) => "getAll",
            ContactOperation::Update { .. } => "update",
        }
    }
}

/// How a response is turned into output items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Body ignored; a `{"success": true}` item is emitted
    SuccessMarker,
    /// Body is one contact
    Single,
    /// Body is an array of contacts
    List,
}

// ============================================================================
// Request Descriptor
// ============================================================================

/// One outbound API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `/contacts/{id}`
    pub path: String,
    pub body: Option<JsonObject>,
    pub query: QueryParams,
}

impl ApiRequest {
    /// Create a request without body or query
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: QueryParams::new(),
        }
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_body(mut self, body: JsonObject) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Transport configuration for this request
    pub fn to_request_config(&self) -> RequestConfig {
        let mut config = self
            .query
            .iter()
            .fold(RequestConfig::new(), |config, (key, value)| {
                config.query(key, value)
            });
        if let Some(body) = &self.body {
            config = config.json(JsonValue::Object(body.clone()));
        }
        config
    }
}
