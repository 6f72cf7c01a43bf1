// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # CRM Connector Development Kit
//!
//! Typed, cursor-paginated retrieval of CRM objects (contacts, companies,
//! deals) over a pluggable transport.
//!
//! ## Features
//!
//! - **Cursor Pagination**: one generic loop for every list endpoint
//! - **Lazy Streams**: pages are fetched only as the consumer pulls
//! - **Typed Domains**: contacts, companies and deals share one implementation
//! - **HTTP Transport**: retries, backoff and rate limiting on reqwest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crm_cdk::{CrmConfig, PageParams, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = CrmConfig::load("crm.yaml")?.with_env().build_client()?;
//!     let contacts = client.contacts();
//!
//!     // One page
//!     let page = contacts.list_contacts(&PageParams::new().limit(10)).await?;
//!
//!     // Every contact, lazily
//!     let mut stream = contacts.stream_contacts(&PageParams::new().properties(["email"]));
//!     while let Some(contact) = stream.try_next().await? {
//!         println!("{}", contact.id);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          CrmClient                              │
//! │        contacts()          companies()          deals()         │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │                        CrudDomain<T>                            │
//! │  list() → page    get() → item    stream_all()    get_all()     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────────────┴───────────┬──────────────────────┐
//! │   Auth   │         Transport             │       Models         │
//! ├──────────┼───────────────────────────────┼──────────────────────┤
//! │ Bearer   │ HttpClient (retry, backoff,   │ CrmObject            │
//! │ API Key  │   rate limit)                 │ Foo / Bar / Cdc      │
//! │ Basic    │ any impl Transport            │                      │
//! └──────────┴───────────────────────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Cursor pagination and the generic CRUD domain
pub mod pagination;

/// Data models
pub mod models;

/// CRM object domains
pub mod domains;

/// Client facade
pub mod client;

/// Configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::CrmClient;
pub use config::CrmConfig;
pub use http::{SendRequest, Transport};
pub use pagination::{CrudDomain, ListResponse, PageParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
