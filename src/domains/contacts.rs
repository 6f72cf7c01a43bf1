//! Contacts domain

use crate::error::Result;
use crate::http::Transport;
use crate::models::{Contact, Contacts};
use crate::pagination::{CrudDomain, PageParams};
use futures::stream::BoxStream;
use std::sync::Arc;

/// Base path of the contacts endpoints
pub const CONTACTS_PATH: &str = "/crm/v3/objects/contacts";

/// Contacts retrieval operations
#[derive(Debug, Clone)]
pub struct ContactsDomain {
    base: CrudDomain<Contact>,
}

impl ContactsDomain {
    /// Bind to a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base: CrudDomain::new(CONTACTS_PATH, transport),
        }
    }

    /// Fetch one page of contacts
    pub async fn list_contacts(&self, params: &PageParams) -> Result<Contacts> {
        self.base.list(params).await
    }

    /// Fetch one contact by id
    pub async fn get_contact(&self, id: &str) -> Result<Contact> {
        self.base.get(id).await
    }

    /// Fetch one contact by id with extra query parameters
    pub async fn get_contact_with(&self, id: &str, params: &PageParams) -> Result<Contact> {
        self.base.get_with(id, params).await
    }

    /// Lazily stream every contact
    pub fn stream_contacts(&self, params: &PageParams) -> BoxStream<'static, Result<Contact>> {
        self.base.stream_all(params)
    }

    /// Collect every contact
    pub async fn get_contacts(&self, params: &PageParams) -> Result<Vec<Contact>> {
        self.base.get_all(params).await
    }
}

/// Build the contacts domain over a transport
pub fn build_contacts_domain(transport: Arc<dyn Transport>) -> ContactsDomain {
    ContactsDomain::new(transport)
}
