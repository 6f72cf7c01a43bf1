//! Companies domain

use crate::error::Result;
use crate::http::Transport;
use crate::models::{Companies, Company};
use crate::pagination::{CrudDomain, PageParams};
use futures::stream::BoxStream;
use std::sync::Arc;

/// Base path of the companies endpoints
pub const COMPANIES_PATH: &str = "/crm/v3/objects/companies";

/// Companies retrieval operations
#[derive(Debug, Clone)]
pub struct CompaniesDomain {
    base: CrudDomain<Company>,
}

impl CompaniesDomain {
    /// Bind to a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base: CrudDomain::new(COMPANIES_PATH, transport),
        }
    }

    /// Fetch one page of companies
    pub async fn list_companies(&self, params: &PageParams) -> Result<Companies> {
        self.base.list(params).await
    }

    /// Fetch one company by id
    pub async fn get_company(&self, id: &str) -> Result<Company> {
        self.base.get(id).await
    }

    /// Fetch one company by id with extra query parameters
    pub async fn get_company_with(&self, id: &str, params: &PageParams) -> Result<Company> {
        self.base.get_with(id, params).await
    }

    /// Lazily stream every company
    pub fn stream_companies(&self, params: &PageParams) -> BoxStream<'static, Result<Company>> {
        self.base.stream_all(params)
    }

    /// Collect every company
    pub async fn get_companies(&self, params: &PageParams) -> Result<Vec<Company>> {
        self.base.get_all(params).await
    }
}

/// Build the companies domain over a transport
pub fn build_companies_domain(transport: Arc<dyn Transport>) -> CompaniesDomain {
    CompaniesDomain::new(transport)
}
