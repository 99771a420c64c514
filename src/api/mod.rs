//! Project-management API client and types.
//!
//! This module provides the interface for communicating with the backend
//! REST API: a bearer-token HTTP client and one thin service per resource.

mod auth;
mod client;
mod company;
mod error;
mod projects;
mod teams;
mod tasks;
mod tokens;
pub mod types;
mod users;

pub use auth::AuthService;
pub use client::ApiClient;
pub use company::CompanyService;
pub use error::{ApiError, ErrorBody, Result};
pub use projects::ProjectService;
pub use tasks::TaskService;
pub use teams::{TeamService, DEFAULT_MEMBER_ROLE};
pub use tokens::{
    KeyringTokenStore, MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
};
pub use users::UserService;

impl ApiClient {
    /// Authentication and profile endpoints.
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// Company endpoints.
    pub fn company(&self) -> CompanyService<'_> {
        CompanyService::new(self)
    }

    /// User management endpoints.
    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Team endpoints.
    pub fn teams(&self) -> TeamService<'_> {
        TeamService::new(self)
    }

    /// Project endpoints.
    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(self)
    }

    /// Task endpoints.
    pub fn tasks(&self) -> TaskService<'_> {
        TaskService::new(self)
    }
}
