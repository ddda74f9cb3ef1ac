//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use reqwest::header::HeaderMap;
use std::collections::BTreeMap;

/// Header carrying the number of pages for a listing
pub const TOTAL_PAGES_HEADER: &str = "TotalPages";

/// Header carrying the page number just returned
pub const CURRENT_PAGE_HEADER: &str = "CurrentPage";

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: BTreeMap<String, String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: BTreeMap<String, String>) -> Self {
        Self::Continue {
            query_params: params,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Stop conditions for pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StopCondition {
    /// Stop when page is empty (no records)
    #[default]
    EmptyPage,

    /// Stop when the current page header reaches the total pages header
    TotalPagesHeader {
        /// Header with the page count
        total: String,
        /// Header with the current page number
        current: String,
    },
}

impl StopCondition {
    /// `TotalPages`/`CurrentPage` headers as sent by GetResponse
    pub fn total_pages_headers() -> Self {
        Self::TotalPagesHeader {
            total: TOTAL_PAGES_HEADER.to_string(),
            current: CURRENT_PAGE_HEADER.to_string(),
        }
    }
}

/// Result of checking a stop condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopResult {
    /// Continue pagination
    Continue,
    /// Stop pagination
    Stop,
}

impl StopResult {
    /// Check if we should continue
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if we should stop
    pub fn should_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Page to request next; 0 until the first response is processed
    pub page: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Responses processed so far
    pub pages_fetched: u32,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Record one processed response
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.total_fetched += records as u64;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the request about to be made
    fn request_params(&self, state: &PaginationState) -> BTreeMap<String, String>;

    /// Process a response and determine if there's a next page
    fn process_response(
        &self,
        headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}

/// Check a stop condition against a response
pub fn check_stop_condition(
    condition: &StopCondition,
    headers: &HeaderMap,
    records_count: usize,
) -> StopResult {
    match condition {
        StopCondition::EmptyPage => {
            if records_count == 0 {
                StopResult::Stop
            } else {
                StopResult::Continue
            }
        }
        StopCondition::TotalPagesHeader { total, current } => {
            match (header_u32(headers, total), header_u32(headers, current)) {
                (Some(total), Some(current)) if current >= total => StopResult::Stop,
                _ if records_count == 0 => StopResult::Stop,
                _ => StopResult::Continue,
            }
        }
    }
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
