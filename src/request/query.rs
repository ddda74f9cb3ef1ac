//! Query string shaping
//!
//! GetResponse filters contacts with bracketed keys such as
//! `query[email]=...`, `query[createdOn][from]=...` and `sort[name]=ASC`.
//! The host collects these as a flat option bag; this module rewrites it.

use crate::error::{Error, Result};
use crate::types::{json_to_query_value, JsonObject, JsonValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Options sent under their own name rather than as `query[...]`
const PASS_THROUGH_KEYS: [&str; 5] = [
    "sortBy",
    "sortOrder",
    "additionalFlags",
    "fields",
    "exactMatch",
];

/// Offset timestamp layout GetResponse accepts in date filters
const DATE_FILTER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Local timestamp layouts a host may send without an offset
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Ordered query parameters for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy an option bag verbatim, skipping null values
    pub fn from_options(options: &JsonObject) -> Self {
        options
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), json_to_query_value(value)))
            .collect()
    }

    /// Set a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate parameters in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Bracketed key for a date-range option
fn date_filter_key(key: &str) -> Option<&'static str> {
    match key {
        "createdOnFrom" => Some("query[createdOn][from]"),
        "createdOnTo" => Some("query[createdOn][to]"),
        "changeOnFrom" => Some("query[changeOn][from]"),
        "changeOnTo" => Some("query[changeOn][to]"),
        _ => None,
    }
}

/// Rewrite contact listing options into GetResponse query parameters.
///
/// Every option key is consumed exactly once:
/// - `fields` and `additionalFlags` pass through unchanged
/// - `sortBy`/`sortOrder` become `sort[<sortBy>]=<sortOrder or ASC>`; a
///   `sortOrder` without `sortBy` is sent as is
/// - `exactMatch: true` becomes `additionalFlags=exactMatch`; any other
///   `exactMatch` value is sent as is
/// - date-range keys become `query[createdOn][from]`-style offset timestamps
/// - anything else becomes `query[<key>]`
pub fn translate_list_options(options: &JsonObject, tz: Tz) -> Result<QueryParams> {
    let mut query = QueryParams::new();

    let sort_by = options
        .get("sortBy")
        .map(json_to_query_value)
        .filter(|s| !s.is_empty());
    let exact_match = matches!(options.get("exactMatch"), Some(JsonValue::Bool(true)));

    for (key, value) in options {
        let rewritten = match key.as_str() {
            "sortBy" => true,
            "sortOrder" => sort_by.is_some(),
            "exactMatch" => exact_match,
            _ => false,
        };
        if value.is_null() || rewritten {
            continue;
        }

        if PASS_THROUGH_KEYS.contains(&key.as_str()) {
            query.insert(key.clone(), json_to_query_value(value));
        } else if let Some(filter_key) = date_filter_key(key) {
            query.insert(filter_key, format_date_filter(key, value, tz)?);
        } else {
            query.insert(format!("query[{key}]"), json_to_query_value(value));
        }
    }

    if let Some(sort_by) = sort_by {
        let order = options
            .get("sortOrder")
            .map(json_to_query_value)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "ASC".to_string());
        query.insert(format!("sort[{sort_by}]"), order);
    }

    if exact_match {
        query.insert("additionalFlags", "exactMatch");
    }

    Ok(query)
}

/// Render a date option in `tz` as `YYYY-MM-DDTHH:MM:SS±HHMM`.
///
/// Values carrying an offset are converted into `tz`; values without one are
/// read as wall-clock time in `tz`; a bare date means midnight.
pub fn format_date_filter(key: &str, value: &JsonValue, tz: Tz) -> Result<String> {
    let raw = value
        .as_str()
        .map(str::trim)
        .ok_or_else(|| Error::invalid_param(key, format!("expected a date string, got {value}")))?;

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset
            .with_timezone(&tz)
            .format(DATE_FILTER_FORMAT)
            .to_string());
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| Error::invalid_param(key, format!("unrecognised date '{raw}'")))?;

    let local = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        Error::invalid_param(key, format!("'{raw}' does not exist in timezone {tz}"))
    })?;

    Ok(local.format(DATE_FILTER_FORMAT).to_string())
}
