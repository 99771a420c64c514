//! Authentication endpoints.
//!
//! Login and registration store the issued token pair in the client's
//! token store. Logout is best-effort against the backend and always
//! clears the local tokens.

use tracing::{info, instrument, warn};

use super::client::ApiClient;
use super::error::Result;
use super::types::{
    AuthResponse, CompanyRegistration, LoginCredentials, LogoutRequest, MessageResponse,
    PasswordChange, ProfileUpdate, User,
};

/// The `/auth/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and store the issued tokens.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let response: AuthResponse = self.client.post("/auth/login/", credentials).await?;
        self.store_tokens(&response)?;
        info!(user = %response.user.username, "Logged in");
        Ok(response)
    }

    /// Register a company with its owner account and store the issued tokens.
    #[instrument(skip(self, registration), fields(company = %registration.name))]
    pub async fn register(&self, registration: &CompanyRegistration) -> Result<AuthResponse> {
        let response: AuthResponse = self.client.post("/auth/register/", registration).await?;
        self.store_tokens(&response)?;
        info!(user = %response.user.username, "Registered company");
        Ok(response)
    }

    /// Log out.
    ///
    /// Posts the refresh token to the backend, then clears both tokens
    /// whatever the outcome. Backend failures are logged, never returned.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let request = LogoutRequest {
            refresh_token: self.client.tokens().refresh_token(),
        };

        if let Err(e) = self
            .client
            .post_discarding("/auth/logout/", &request)
            .await
        {
            warn!("Logout request failed, clearing tokens anyway: {}", e);
        }

        self.client.tokens().clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Whether an access token is stored. Says nothing about its validity.
    pub fn is_authenticated(&self) -> bool {
        self.client.tokens().access_token().is_some()
    }

    /// Fetch the authenticated user.
    pub async fn current_user(&self) -> Result<User> {
        self.client.get("/auth/current-user/").await
    }

    /// Update the authenticated user's profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.client.patch("/auth/profile/", update).await
    }

    /// Change the authenticated user's password.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<MessageResponse> {
        self.client.patch("/auth/change-password/", change).await
    }

    fn store_tokens(&self, response: &AuthResponse) -> Result<()> {
        self.client
            .tokens()
            .store_pair(&response.tokens.access, &response.tokens.refresh)
    }
}
