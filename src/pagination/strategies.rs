//! Pagination strategy implementations

use super::types::{
    check_stop_condition, NextPage, PaginationState, Paginator, StopCondition, StopResult,
};
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// Requests `page = start, start + 1, ...` with a fixed page size and stops
/// on a short page or when the stop condition fires.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// First page number (usually 0 or 1)
    pub start_page: u32,
    /// Query parameter name for page size
    pub page_size_param: String,
    /// Page size value
    pub page_size: u32,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(
        page_param: impl Into<String>,
        start_page: u32,
        page_size_param: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            page_size_param: page_size_param.into(),
            page_size,
            stop_condition: StopCondition::EmptyPage,
        }
    }

    /// `page`/`perPage` pagination starting at 1, honouring page headers
    pub fn getresponse(page_size: u32) -> Self {
        Self::new("page", 1, "perPage", page_size)
            .with_stop_condition(StopCondition::total_pages_headers())
    }

    /// Set stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    fn current_page(&self, state: &PaginationState) -> u32 {
        state.page.max(self.start_page)
    }

    fn params_for(&self, page: u32) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(self.page_param.clone(), page.to_string());
        params.insert(self.page_size_param.clone(), self.page_size.to_string());
        params
    }
}

impl Paginator for PageNumberPaginator {
    fn request_params(&self, state: &PaginationState) -> BTreeMap<String, String> {
        self.params_for(self.current_page(state))
    }

    fn process_response(
        &self,
        headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        let current = self.current_page(state);
        state.add_page(records_count);

        if check_stop_condition(&self.stop_condition, headers, records_count)
            == StopResult::Stop
        {
            state.mark_done();
            return NextPage::Done;
        }

        // A short page is the last one
        if records_count < self.page_size as usize {
            state.mark_done();
            return NextPage::Done;
        }

        state.page = current + 1;
        NextPage::with_params(self.params_for(state.page))
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// One request with an explicit page size
#[derive(Debug, Clone)]
pub struct SinglePagePaginator {
    /// Query parameter name for page size
    pub page_size_param: String,
    /// Number of records requested
    pub limit: u32,
}

impl SinglePagePaginator {
    /// Create a new single page paginator
    pub fn new(page_size_param: impl Into<String>, limit: u32) -> Self {
        Self {
            page_size_param: page_size_param.into(),
            limit,
        }
    }

    /// `perPage = limit`
    pub fn getresponse(limit: u32) -> Self {
        Self::new("perPage", limit)
    }
}

impl Paginator for SinglePagePaginator {
    fn request_params(&self, _state: &PaginationState) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(self.page_size_param.clone(), self.limit.to_string());
        params
    }

    fn process_response(
        &self,
        _headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(records_count);
        state.mark_done();
        NextPage::Done
    }
}
