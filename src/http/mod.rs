//! HTTP client module
//!
//! Provides the HTTP transport behind every page fetch and single-resource
//! call.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Basic / Bearer credentials from the auth module

mod client;
mod rate_limit;

pub use client::{default_user_agent, HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
