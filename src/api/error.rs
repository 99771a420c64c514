//! API error types for the project-management client.

use serde_json::Value;
use thiserror::Error;

/// The decoded body of a backend error response.
///
/// The backend reports either a top-level `detail` message or a map of
/// field names to message lists (including `non_field_errors`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    /// The `detail` message, if present.
    pub detail: Option<String>,
    /// Field errors as `(field, messages)` pairs.
    pub field_errors: Vec<(String, Vec<String>)>,
}

impl ErrorBody {
    /// Parse an error body from raw response text.
    ///
    /// Non-JSON bodies produce an empty `ErrorBody`.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(json) => Self::from_json(&json),
            Err(_) => Self::default(),
        }
    }

    /// Extract detail and field errors from a JSON value.
    pub fn from_json(json: &Value) -> Self {
        let Some(obj) = json.as_object() else {
            // A bare list of messages counts as one anonymous field error.
            if let Some(arr) = json.as_array() {
                let messages = collect_messages(json);
                if !arr.is_empty() && !messages.is_empty() {
                    return Self {
                        detail: None,
                        field_errors: vec![("non_field_errors".to_string(), messages)],
                    };
                }
            }
            return Self::default();
        };

        let detail = obj
            .get("detail")
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .filter(|d| !d.is_empty());

        let field_errors = obj
            .iter()
            .filter(|(key, _)| key.as_str() != "detail")
            .map(|(key, value)| (key.clone(), collect_messages(value)))
            .filter(|(_, messages)| !messages.is_empty())
            .collect();

        Self {
            detail,
            field_errors,
        }
    }

    /// All field-error messages flattened and joined with `", "`.
    pub fn joined_field_messages(&self) -> Option<String> {
        let messages: Vec<&str> = self
            .field_errors
            .iter()
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
            .collect();

        if messages.is_empty() {
            None
        } else {
            Some(messages.join(", "))
        }
    }

    /// The message to show for this body: detail, else joined field errors.
    pub fn message(&self) -> Option<String> {
        self.detail.clone().or_else(|| self.joined_field_messages())
    }
}

/// Flatten a JSON value into its string messages.
fn collect_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(collect_messages).collect(),
        Value::Object(map) => map.values().flat_map(collect_messages).collect(),
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(_) | Value::Null => Vec::new(),
    }
}

fn describe(body: &ErrorBody) -> String {
    body.message().unwrap_or_else(|| "no details".to_string())
}

/// Errors that can occur when talking to the project-management API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed or the token was rejected.
    #[error("Authentication failed: {}", describe(.0))]
    Unauthorized(ErrorBody),

    /// The user lacks permission for the resource.
    #[error("Permission denied: {}", describe(.0))]
    Forbidden(ErrorBody),

    /// Resource not found.
    #[error("Resource not found: {}", describe(.0))]
    NotFound(ErrorBody),

    /// The backend rejected the request (validation and other 4xx errors).
    #[error("Request rejected (HTTP {status}): {}", describe(.body))]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The decoded error body.
        body: ErrorBody,
    },

    /// Backend server error.
    #[error("Server error (HTTP {status}): {}", describe(.body))]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The decoded error body.
        body: ErrorBody,
    },

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Token storage error when reading or writing tokens.
    #[error("Token storage error: {0}")]
    TokenStore(String),

    /// The response could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code and raw body text.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = ErrorBody::parse(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(body),
            403 => ApiError::Forbidden(body),
            404 => ApiError::NotFound(body),
            code @ 500..=599 => ApiError::ServerError { status: code, body },
            code => ApiError::Rejected { status: code, body },
        }
    }

    /// The decoded backend body, for HTTP errors.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Unauthorized(body)
            | ApiError::Forbidden(body)
            | ApiError::NotFound(body)
            | ApiError::Rejected { body, .. }
            | ApiError::ServerError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The HTTP status code, for HTTP errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Rejected { status, .. } | ApiError::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// The message to show in a toast.
    ///
    /// Uses the backend's `detail`, else the joined field errors, else
    /// `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        self.body()
            .and_then(ErrorBody::message)
            .unwrap_or_else(|| fallback.to_string())
    }
}
