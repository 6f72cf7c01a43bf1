//! Authentication module
//!
//! Supports: Bearer (private app token), API Key (header or query), Basic
//!
//! The `Authenticator` applies the configured credentials to every outgoing
//! request. Tokens are static; refresh flows belong to whoever issues them.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};

#[cfg(test)]
mod tests;
