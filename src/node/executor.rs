//! Per-item execution

use crate::config::{parse_timezone, ConnectorConfig, PaginationSettings};
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{PageNumberPaginator, PaginatedFetcher, Paginator, SinglePagePaginator};
use crate::request::{build_request, ContactOperation, NodeParameters, Operation, ResponseShape};
use crate::types::JsonValue;
use chrono_tz::Tz;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

/// The GetResponse node: turns parameters into API calls and output items
pub struct GetResponseNode {
    client: HttpClient,
    pagination: PaginationSettings,
    tz: Tz,
}

impl GetResponseNode {
    /// Create a node from its parts
    pub fn new(client: HttpClient, pagination: PaginationSettings, tz: Tz) -> Self {
        Self {
            client,
            pagination,
            tz,
        }
    }

    /// Create a node from a validated configuration
    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_auth(config.http_client_config(), config.auth_config())?;
        Ok(Self::new(client, config.pagination.clone(), config.tz()?))
    }

    /// Underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Run every input item in order, stopping at the first failure
    pub async fn execute(&self, params: &dyn NodeParameters) -> Result<Vec<JsonValue>> {
        let start = Instant::now();
        let mut output = Vec::new();

        for item in 0..params.item_count() {
            output.extend(self.execute_item(params, item).await?);
        }

        info!(
            "Processed {} items into {} results in {}ms",
            params.item_count(),
            output.len(),
            start.elapsed().as_millis()
        );
        Ok(output)
    }

    /// Run one input item and return its output items
    pub async fn execute_item(
        &self,
        params: &dyn NodeParameters,
        item: usize,
    ) -> Result<Vec<JsonValue>> {
        let tz = match params.timezone() {
            Some(name) => parse_timezone(name)?,
            None => self.tz,
        };
        let operation = Operation::from_parameters(params, item)?;
        debug!("Item {item}: {} {}", operation.resource(), operation.name());

        let response = self.run(&operation, tz).await?;
        Ok(flatten(response))
    }

    /// Perform one operation and shape its response
    pub async fn run(&self, operation: &Operation, tz: Tz) -> Result<JsonValue> {
        let request = build_request(operation, tz)?;

        if let Operation::Contact(ContactOperation::GetAll(list)) = operation {
            let paginator: Box<dyn Paginator> = if list.return_all {
                Box::new(PageNumberPaginator::getresponse(self.pagination.page_size))
            } else {
                Box::new(SinglePagePaginator::getresponse(list.limit))
            };
            let max_pages = if list.return_all {
                self.pagination.max_pages
            } else {
                None
            };

            let items = PaginatedFetcher::new(&self.client)
                .with_max_pages(max_pages)
                .fetch(&request, paginator.as_ref())
                .await?;
            return Ok(JsonValue::Array(items));
        }

        let response = self
            .client
            .request(request.method, &request.path, request.to_request_config())
            .await?;

        Ok(match operation.response_shape() {
            ResponseShape::SuccessMarker => json!({ "success": true }),
            ResponseShape::Single | ResponseShape::List => response.body,
        })
    }
}

/// Arrays are spread into separate items; anything else is one item
fn flatten(value: JsonValue) -> Vec<JsonValue> {
    match value {
        JsonValue::Array(items) => items,
        other => vec![other],
    }
}
