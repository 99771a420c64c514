//! The authenticated session.
//!
//! A `Session` owns the API client and the in-memory copies of the current
//! user and company. Authentication state is derived from token presence
//! in the client's token store, never from the in-memory user. A session
//! that has signed out stays anonymous even if the store failed to forget
//! its tokens.

use tracing::{debug, info};

use crate::api::types::{AuthResponse, Company, CompanyRegistration, LoginCredentials, User};
use crate::api::{self, ApiClient};

/// The current user's session.
#[derive(Debug, Clone)]
pub struct Session {
    client: ApiClient,
    user: Option<User>,
    company: Option<Company>,
    /// Set on sign-out; stored tokens are ignored until the next login.
    signed_out: bool,
}

impl Session {
    /// Create a session around a client. No user is known yet.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: None,
            company: None,
            signed_out: false,
        }
    }

    /// The API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Whether an access token is stored and the session has not signed out.
    pub fn is_authenticated(&self) -> bool {
        !self.signed_out && self.client.auth().is_authenticated()
    }

    /// The current user, once known.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The current user's company, once known.
    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    /// Whether the current user is a company admin.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Whether a token is stored but the user has not been fetched yet.
    pub fn is_resolving(&self) -> bool {
        self.is_authenticated() && self.user.is_none()
    }

    /// Log in and record the returned user and company.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> api::Result<&User> {
        let response = self.client.auth().login(credentials).await?;
        Ok(self.establish(response))
    }

    /// Register a company and record the returned owner and company.
    pub async fn register(&mut self, registration: &CompanyRegistration) -> api::Result<&User> {
        let response = self.client.auth().register(registration).await?;
        Ok(self.establish(response))
    }

    /// Log out. The session is anonymous afterwards even when the backend
    /// call or the token store fails.
    pub async fn logout(&mut self) -> api::Result<()> {
        let result = self.client.auth().logout().await;
        self.sign_out();
        result
    }

    /// Fetch and record the current user.
    pub async fn current_user(&mut self) -> api::Result<&User> {
        let user = self.client.auth().current_user().await?;
        Ok(self.set_user(user))
    }

    /// Record the result of a login or registration performed elsewhere.
    pub fn establish(&mut self, response: AuthResponse) -> &User {
        info!(user = %response.user.username, "Session established");
        self.signed_out = false;
        if response.company.is_some() {
            self.company = response.company;
        }
        self.set_user(response.user)
    }

    /// Record the current user.
    pub fn set_user(&mut self, user: User) -> &User {
        self.user.insert(user)
    }

    /// Record the current company.
    pub fn set_company(&mut self, company: Company) {
        self.company = Some(company);
    }

    /// Forget the in-memory user and company.
    pub fn clear(&mut self) {
        debug!("Session cleared");
        self.user = None;
        self.company = None;
    }

    /// Forget the user and treat the session as anonymous, whatever the
    /// token store still holds.
    pub fn sign_out(&mut self) {
        self.clear();
        self.signed_out = true;
    }
}
