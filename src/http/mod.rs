//! HTTP module
//!
//! Provides the send capability ([`Transport`]) and the reqwest-backed
//! [`HttpClient`] that implements it.
//!
//! Transient failures (timeouts, connection errors, 429 and 5xx) are
//! retried with constant, linear or exponential backoff. A 429 waits for
//! its `Retry-After` instead.

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, RetryPolicy, DEFAULT_BASE_URL};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{SendRequest, Transport};

#[cfg(test)]
pub(crate) mod mock;
