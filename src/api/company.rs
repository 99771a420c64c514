//! Company endpoints.

use super::client::ApiClient;
use super::error::Result;
use super::types::{Company, CompanyUpdate};

/// The `/auth/company/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CompanyService<'a> {
    client: &'a ApiClient,
}

impl<'a> CompanyService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the current user's company.
    pub async fn get(&self) -> Result<Company> {
        self.client.get("/auth/company/").await
    }

    /// Update the current user's company.
    pub async fn update(&self, update: &CompanyUpdate) -> Result<Company> {
        self.client.patch("/auth/company/", update).await
    }
}
