//! Request descriptor construction
//!
//! One operation in, one `ApiRequest` out. No I/O happens here.

use super::query::{translate_list_options, QueryParams};
use super::types::{ApiRequest, ContactOperation, CreateContact, Operation};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Method};
use chrono_tz::Tz;
use serde_json::json;

/// Key the host uses for the custom field collection
pub const CUSTOM_FIELDS_UI_KEY: &str = "customFieldsUi";

/// Key GetResponse expects for custom field values
pub const CUSTOM_FIELD_VALUES_KEY: &str = "customFieldValues";

const CONTACTS_PATH: &str = "/contacts";

/// Whether custom field values are normalised to arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomFieldMode {
    /// Wrap scalar values in a one-element array
    Coerce,
    /// Send values exactly as given
    PassThrough,
}

/// Build the request for one operation
///
/// For `getAll` the descriptor is the base listing request; page parameters
/// are added by the paginated fetcher.
pub fn build_request(operation: &Operation, tz: Tz) -> Result<ApiRequest> {
    match operation {
        Operation::Contact(op) => build_contact_request(op, tz),
    }
}

fn build_contact_request(op: &ContactOperation, tz: Tz) -> Result<ApiRequest> {
    match op {
        ContactOperation::Create(create) => {
            let body = create_body(create)?;
            Ok(ApiRequest::new(Method::POST, CONTACTS_PATH).with_body(body))
        }
        ContactOperation::Delete {
            contact_id,
            options,
        } => Ok(ApiRequest::new(Method::DELETE, contact_path(contact_id))
            .with_query(QueryParams::from_options(options))),
        ContactOperation::Get {
            contact_id,
            options,
        } => Ok(ApiRequest::new(Method::GET, contact_path(contact_id))
            .with_query(QueryParams::from_options(options))),
        ContactOperation::GetAll(list) => Ok(ApiRequest::new(Method::GET, CONTACTS_PATH)
            .with_query(translate_list_options(&list.options, tz)?)),
        ContactOperation::Update {
            contact_id,
            update_fields,
        } => {
            let mut body = update_fields.clone();
            apply_custom_fields(&mut body, CustomFieldMode::PassThrough)?;
            Ok(ApiRequest::new(Method::POST, contact_path(contact_id)).with_body(body))
        }
    }
}

fn contact_path(contact_id: &str) -> String {
    format!("{CONTACTS_PATH}/{contact_id}")
}

/// `{email, campaign: {campaignId}}` merged with the additional fields
fn create_body(create: &CreateContact) -> Result<JsonObject> {
    let mut body = JsonObject::new();
    body.insert("email".to_string(), json!(create.email));
    body.insert(
        "campaign".to_string(),
        json!({ "campaignId": create.campaign_id }),
    );

    for (key, value) in &create.additional_fields {
        body.insert(key.clone(), value.clone());
    }

    apply_custom_fields(&mut body, CustomFieldMode::Coerce)?;
    Ok(body)
}

/// Move `customFieldsUi.customFieldValues` to a top-level `customFieldValues`.
///
/// The UI key is always removed. With `CustomFieldMode::Coerce` every
/// non-array `value` is wrapped in a one-element array.
pub fn apply_custom_fields(body: &mut JsonObject, mode: CustomFieldMode) -> Result<()> {
    let Some(collection) = body.remove(CUSTOM_FIELDS_UI_KEY) else {
        return Ok(());
    };

    let values = match collection {
        JsonValue::Object(mut ui) => ui.remove(CUSTOM_FIELD_VALUES_KEY),
        JsonValue::Null => None,
        other => {
            return Err(Error::invalid_param(
                CUSTOM_FIELDS_UI_KEY,
                format!("expected an object, got {other}"),
            ))
        }
    };

    let mut entries = match values {
        Some(JsonValue::Array(entries)) => entries,
        None | Some(JsonValue::Null) => return Ok(()),
        Some(other) => {
            return Err(Error::invalid_param(
                CUSTOM_FIELD_VALUES_KEY,
                format!("expected a list, got {other}"),
            ))
        }
    };

    if mode == CustomFieldMode::Coerce {
        for entry in &mut entries {
            if let Some(value) = entry.get_mut("value") {
                if !value.is_array() {
                    *value = JsonValue::Array(vec![value.take()]);
                }
            }
        }
    }

    body.insert(
        CUSTOM_FIELD_VALUES_KEY.to_string(),
        JsonValue::Array(entries),
    );
    Ok(())
}
