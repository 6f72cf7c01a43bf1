//! The send capability
//!
//! Everything above the HTTP layer talks to the remote API through the
//! [`Transport`] trait: one request in, one parsed JSON body (or an error
//! carrying the HTTP status and service payload) out. Base URL, auth,
//! retries and timeouts are the implementor's concern.

use crate::error::Result;
use crate::types::{JsonValue, Method, QueryValue};
use async_trait::async_trait;

/// A single request handed to a [`Transport`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendRequest {
    /// Path relative to the transport's base URL
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Query parameters in insertion order
    pub query: Vec<(String, QueryValue)>,
    /// Optional JSON body
    pub body: Option<JsonValue>,
}

impl SendRequest {
    /// Create a GET request for a path
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::GET,
            ..Default::default()
        }
    }

    /// Replace the query parameters
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, QueryValue)>) -> Self {
        self.query = query;
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a single-valued query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_single())
    }

    /// Flatten the query into `(key, value)` pairs, repeating list keys
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .flat_map(|(k, v)| v.pairs(k))
            .collect()
    }
}

/// Performs one HTTP request and returns the parsed JSON body.
///
/// Implementations must be safe to share between concurrent callers.
/// A non-2xx response is reported as [`crate::Error::HttpStatus`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request
    async fn send(&self, request: SendRequest) -> Result<JsonValue>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: SendRequest) -> Result<JsonValue> {
        (**self).send(request).await
    }
}
