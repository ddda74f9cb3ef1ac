//! Response schemas
//!
//! Typed views of the GetResponse entities the option loaders read.
//! Contact responses are passed through as raw JSON.

mod types;

pub use types::{decode_list, Campaign, CustomField, NamedEntity, Tag};
