//! Company user endpoints.

use tracing::instrument;

use super::client::ApiClient;
use super::error::Result;
use super::types::{ListResponse, User, UserCreate, UserUpdate};

/// The `/auth/users/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List the users of the current company.
    pub async fn list(&self) -> Result<Vec<User>> {
        let list: ListResponse<User> = self.client.get("/auth/users/").await?;
        Ok(list.into_vec())
    }

    /// Fetch one user.
    pub async fn get(&self, id: &str) -> Result<User> {
        self.client.get(&user_path(id)).await
    }

    /// Create a user in the current company.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create(&self, user: &UserCreate) -> Result<User> {
        self.client.post("/auth/users/", user).await
    }

    /// Partially update a user.
    pub async fn update(&self, id: &str, update: &UserUpdate) -> Result<User> {
        self.client.patch(&user_path(id), update).await
    }

    /// Delete a user.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&user_path(id)).await
    }

    /// Mark a user active.
    pub async fn activate(&self, id: &str) -> Result<User> {
        self.set_active(id, true).await
    }

    /// Mark a user inactive.
    pub async fn deactivate(&self, id: &str) -> Result<User> {
        self.set_active(id, false).await
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<User> {
        let update = UserUpdate {
            is_active: Some(active),
            ..Default::default()
        };
        self.update(id, &update).await
    }
}

fn user_path(id: &str) -> String {
    format!("/auth/users/{}/", id)
}
