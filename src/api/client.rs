//! HTTP client wrapper for the project-management REST API.
//!
//! Every request carries the stored access token as a bearer
//! `Authorization` header. Failures are returned to the caller unchanged:
//! there is no retry and no token refresh.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::tokens::TokenStore;
use crate::config::{Profile, Settings};

/// The API client.
///
/// Cheap to clone: clones share the connection pool and the token store.
#[derive(Clone)]
pub struct ApiClient {
    /// The HTTP client.
    http: Client,
    /// The API base URL, without a trailing slash.
    base_url: String,
    /// Where the session tokens are kept.
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.access_token().is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The versioned API root, e.g. `http://localhost:8000/api`
    /// * `tokens` - The token store shared with the session
    /// * `timeout` - Optional request timeout; `None` means no timeout
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the URL is not http(s), or a
    /// network error if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "'{}' must start with http:// or https://",
                base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Network)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            tokens,
        })
    }

    /// Create a client from a profile and the application settings.
    pub fn from_profile(
        profile: &Profile,
        settings: &Settings,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self> {
        let timeout = settings.request_timeout_secs.map(Duration::from_secs);
        Self::new(&profile.api_url, tokens, timeout)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the token store.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Build the full URL for an endpoint path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the common headers and bearer token.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");

        match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Perform a GET request and decode the JSON response.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    /// Perform a POST request with a JSON body and decode the response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        decode(response).await
    }

    /// Perform a POST request with a JSON body, ignoring the response body.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_discarding<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body))
            .await
            .map(|_| ())
    }

    /// Perform a PATCH request with a JSON body and decode the response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PATCH, path).json(body))
            .await?;
        decode(response).await
    }

    /// Perform a DELETE request.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    /// Perform a DELETE request carrying a JSON body.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn delete_with_body<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::DELETE, path).json(body))
            .await
            .map(|_| ())
    }

    /// Send a request and turn non-success statuses into errors.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        debug!(status = %status, "Response received");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            let error = ApiError::from_status(status, &body);
            warn!(status = status.as_u16(), "API error: {}", error);
            Err(error)
        }
    }
}

/// Decode a successful JSON response.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. Tokens will be sent in clear text.", url);
    }

    url.to_string()
}
