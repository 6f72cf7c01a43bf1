//! Pagination types
//!
//! Wire shapes of the list and single-object endpoints, and the caller's
//! page parameters.

use crate::types::QueryValue;
use serde::{Deserialize, Serialize};

/// Query parameter the service reads the page cursor from
pub const CURSOR_PARAM: &str = "after";

/// One page from a list endpoint
///
/// ```json
/// { "results": [ ... ], "paging": { "next": { "after": "..." } } }
/// ```
///
/// `paging` (or `paging.next`) is absent on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Items on this page, in service order
    pub results: Vec<T>,
    /// Link to the next page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T> ListResponse<T> {
    /// Build a page by hand
    pub fn new(results: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            results,
            paging: next_cursor.map(|after| Paging {
                next: Some(NextPage { after, link: None }),
            }),
        }
    }

    /// Cursor for the next page, exactly as the service sent it
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|p| p.next.as_ref())
            .map(|n| n.after.as_str())
    }

    /// True when there is no next page
    pub fn is_last_page(&self) -> bool {
        self.next_cursor().is_none()
    }

    /// Split into items and next cursor
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        let next = self.paging.and_then(|p| p.next).map(|n| n.after);
        (self.results, next)
    }
}

/// Paging block of a list response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paging {
    /// Next page pointer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextPage>,
}

/// Pointer to the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPage {
    /// Opaque cursor token
    pub after: String,
    /// Convenience link the service sometimes includes; never followed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Response of a single-object fetch
///
/// Accepts both `{ "results": <item> }` and the bare item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SingleResponse<T> {
    /// Enveloped item
    Wrapped {
        /// The item
        results: T,
    },
    /// Bare item
    Bare(T),
}

impl<T> SingleResponse<T> {
    /// Unwrap the item
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { results } | Self::Bare(results) => results,
        }
    }
}

/// Caller-supplied query parameters for the first page of a listing.
///
/// The bag is opaque to the pagination core. The core only ever sets
/// [`CURSOR_PARAM`] on follow-up requests; every other parameter is sent
/// unchanged on every page. Insertion order is preserved and setting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    params: Vec<(String, QueryValue)>,
}

impl PageParams {
    /// Empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Page size
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit.to_string())
    }

    /// Properties to return on each object
    #[must_use]
    pub fn properties<I, S>(self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = properties.into_iter().map(Into::into).collect();
        self.param("properties", values)
    }

    /// Object types whose associated ids should be returned
    #[must_use]
    pub fn associations<I, S>(self, object_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = object_types.into_iter().map(Into::into).collect();
        self.param("associations", values)
    }

    /// List archived objects instead of active ones
    #[must_use]
    pub fn archived(self, archived: bool) -> Self {
        self.param("archived", archived.to_string())
    }

    /// Start from a known cursor (for resuming a `list` call)
    #[must_use]
    pub fn after(self, cursor: impl Into<String>) -> Self {
        self.param(CURSOR_PARAM, cursor.into())
    }

    /// Set a parameter in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key, value)),
        }
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Query for one request: these parameters, with `after` set to the
    /// cursor when one is given.
    pub fn to_query(&self, cursor: Option<&str>) -> Vec<(String, QueryValue)> {
        let mut query = self.clone();
        if let Some(cursor) = cursor {
            query.set(CURSOR_PARAM, cursor);
        }
        query.params
    }
}
