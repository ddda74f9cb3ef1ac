//! HTTP transport module
//!
//! Provides the client every API call goes through.
//!
//! # Features
//!
//! - **Base URL joining**: operations only deal in paths like `/contacts/{id}`
//! - **Authentication**: credentials applied per request via the auth module
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Single send**: no retries; 429 surfaces as `RateLimited`, other
//!   failures as `HttpStatus`, `Timeout` or `Http`
//! - **JSON decoding**: bodies decoded once, headers kept for pagination

mod client;
mod rate_limit;

pub use client::{ApiResponse, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
