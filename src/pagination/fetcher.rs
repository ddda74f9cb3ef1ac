//! Paginated fetcher
//!
//! Drives a `Paginator` against a listing endpoint and concatenates the
//! returned arrays in page order.

use super::types::{NextPage, PaginationState, Paginator};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::request::ApiRequest;
use crate::types::JsonValue;
use tracing::debug;

/// Collects every item of a paginated listing
pub struct PaginatedFetcher<'a> {
    client: &'a HttpClient,
    max_pages: Option<u32>,
}

impl<'a> PaginatedFetcher<'a> {
    /// Create a fetcher without a page cap
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            max_pages: None,
        }
    }

    /// Fail once this many pages were fetched without reaching the end
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch pages until the paginator is done
    ///
    /// Each response body must be a JSON array. Page parameters from the
    /// paginator replace same-named parameters of the base request.
    pub async fn fetch(
        &self,
        request: &ApiRequest,
        paginator: &dyn Paginator,
    ) -> Result<Vec<JsonValue>> {
        let mut items = Vec::new();
        let mut state = PaginationState::new();

        loop {
            if let Some(max_pages) = self.max_pages {
                if state.pages_fetched >= max_pages {
                    return Err(Error::PageLimitExceeded { max_pages });
                }
            }

            let config = paginator
                .request_params(&state)
                .into_iter()
                .fold(request.to_request_config(), |config, (key, value)| {
                    config.query(key, value)
                });

            let response = self
                .client
                .request(request.method, &request.path, config)
                .await?;

            let page = match response.body {
                JsonValue::Array(page) => page,
                other => {
                    return Err(Error::decode(format!(
                        "expected a JSON array from {}, got {}",
                        request.path,
                        json_kind(&other)
                    )))
                }
            };

            let record_count = page.len();
            let next = paginator.process_response(&response.headers, record_count, &mut state);
            items.extend(page);

            debug!(
                "Page {}: fetched {record_count} records ({} total)",
                state.pages_fetched, state.total_fetched
            );

            if let NextPage::Done = next {
                break;
            }
        }

        Ok(items)
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
