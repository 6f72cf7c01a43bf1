//! Resource domains
//!
//! Each domain binds the generic [`CrudDomain`](crate::pagination::CrudDomain)
//! to one object type's base path and names the four retrieval operations
//! after the resource.

mod companies;
mod contacts;
mod deals;

pub use companies::{build_companies_domain, CompaniesDomain, COMPANIES_PATH};
pub use contacts::{build_contacts_domain, ContactsDomain, CONTACTS_PATH};
pub use deals::{build_deals_domain, DealsDomain, DEALS_PATH};

#[cfg(test)]
mod tests;
