//! Pagination module
//!
//! Turns a cursor-paginated list endpoint into three retrieval modes:
//!
//! - [`CrudDomain::list`] - one page, verbatim
//! - [`CrudDomain::stream_all`] - every item, lazily, one page in memory
//! - [`CrudDomain::get_all`] - every item, collected
//!
//! plus [`CrudDomain::get`] for a single object.
//!
//! # Overview
//!
//! The service returns `{ "results": [...], "paging": { "next": { "after": "..." } } }`.
//! The `after` token is forwarded verbatim on the next request and never
//! interpreted. A page without `paging.next` is the last one.

mod domain;
mod types;

pub use domain::CrudDomain;
pub use types::{ListResponse, NextPage, PageParams, Paging, SingleResponse, CURSOR_PARAM};
