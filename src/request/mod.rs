//! Request builder module
//!
//! Turns a `(resource, operation, parameters)` tuple into exactly one
//! request descriptor.
//!
//! # Overview
//!
//! - `Operation` - closed union of every supported resource/operation pair
//! - `NodeParameters` - host-side parameter lookup by name and item index
//! - `build_request` - method, path, body and query for one operation
//! - `translate_list_options` - flat UI options to GetResponse query keys

mod builder;
mod params;
mod query;
mod types;

pub use builder::{
    apply_custom_fields, build_request, CustomFieldMode, CUSTOM_FIELDS_UI_KEY,
    CUSTOM_FIELD_VALUES_KEY,
};
pub use params::{NodeParameters, ParameterSet};
pub use query::{format_date_filter, translate_list_options, QueryParams};
pub use types::{
    ApiRequest, ContactOperation, CreateContact, ListContacts, Operation, Resource,
    ResponseShape,
};
