//! Pagination module
//!
//! Supports: Page Number, Single Page
//!
//! # Overview
//!
//! GetResponse lists pages with `page` (starting at 1) and `perPage`. A
//! listing ends on a short page, or when the `CurrentPage` header reaches
//! `TotalPages`. `PaginatedFetcher` runs a strategy against the API and
//! concatenates the pages.

mod fetcher;
mod strategies;
mod types;

pub use fetcher::PaginatedFetcher;
pub use strategies::{PageNumberPaginator, SinglePagePaginator};
pub use types::{
    check_stop_condition, NextPage, PaginationState, Paginator, StopCondition, StopResult,
    CURRENT_PAGE_HEADER, TOTAL_PAGES_HEADER,
};
