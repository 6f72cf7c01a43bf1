//! Deals domain

use crate::error::Result;
use crate::http::Transport;
use crate::models::{Deal, Deals};
use crate::pagination::{CrudDomain, PageParams};
use futures::stream::BoxStream;
use std::sync::Arc;

/// Base path of the deals endpoints
pub const DEALS_PATH: &str = "/crm/v3/objects/deals";

/// Deals retrieval operations
#[derive(Debug, Clone)]
pub struct DealsDomain {
    base: CrudDomain<Deal>,
}

impl DealsDomain {
    /// Bind to a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base: CrudDomain::new(DEALS_PATH, transport),
        }
    }

    /// Fetch one page of deals
    pub async fn list_deals(&self, params: &PageParams) -> Result<Deals> {
        self.base.list(params).await
    }

    /// Fetch one deal by id
    pub async fn get_deal(&self, id: &str) -> Result<Deal> {
        self.base.get(id).await
    }

    /// Fetch one deal by id with extra query parameters
    pub async fn get_deal_with(&self, id: &str, params: &PageParams) -> Result<Deal> {
        self.base.get_with(id, params).await
    }

    /// Lazily stream every deal
    pub fn stream_deals(&self, params: &PageParams) -> BoxStream<'static, Result<Deal>> {
        self.base.stream_all(params)
    }

    /// Collect every deal
    pub async fn get_deals(&self, params: &PageParams) -> Result<Vec<Deal>> {
        self.base.get_all(params).await
    }
}

/// Build the deals domain over a transport
pub fn build_deals_domain(transport: Arc<dyn Transport>) -> DealsDomain {
    DealsDomain::new(transport)
}
