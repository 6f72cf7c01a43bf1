//! Client facade
//!
//! One shared transport, every resource domain.

use crate::auth::AuthConfig;
use crate::domains::{CompaniesDomain, ContactsDomain, DealsDomain};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, Transport};
use std::sync::Arc;

/// Entry point to the CRM object API
#[derive(Clone)]
pub struct CrmClient {
    transport: Arc<dyn Transport>,
}

impl CrmClient {
    /// Wrap any transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build over the reqwest transport
    pub fn with_http(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let http = HttpClient::new(config, auth)?;
        Ok(Self::new(Arc::new(http)))
    }

    /// The shared transport
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn contacts(&self) -> ContactsDomain {
        ContactsDomain::new(self.transport())
    }

    pub fn companies(&self) -> CompaniesDomain {
        CompaniesDomain::new(self.transport())
    }

    pub fn deals(&self) -> DealsDomain {
        DealsDomain::new(self.transport())
    }
}

impl std::fmt::Debug for CrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmClient").finish_non_exhaustive()
    }
}
