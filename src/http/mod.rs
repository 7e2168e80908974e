//! HTTP client module
//!
//! Provides the HTTP client every API call goes through.
//!
//! # Features
//!
//! - **Single attempt**: a failed request is reported, never retried
//! - **Base URL resolution**: relative locators resolve against the API root
//! - **Default headers**: API version and media type on every request
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Authentication**: integration with auth module

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
