//! Centralized error types for taskdeck.
//!
//! `AppError` aggregates the per-layer errors and decides how each one is
//! presented: critical errors open a dialog, everything else is a toast.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Backend errors show the backend's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::Io(_) => {
                    "Could not read or write the configuration file. Check file permissions."
                        .to_string()
                }
                ConfigError::Parse(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::Serialize(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => format!("Profile '{}' not found.", name),
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized(_) => {
                    e.display_message("Your session has expired. Please sign in again.")
                }
                ApiError::Forbidden(_) => {
                    e.display_message("You don't have permission to do that.")
                }
                ApiError::NotFound(_) => e.display_message("The requested item was not found."),
                ApiError::Rejected { .. } => e.display_message("The request was rejected."),
                ApiError::ServerError { .. } => {
                    e.display_message("Server error. Please try again later.")
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check the API URL and your network.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid API URL in configuration.".to_string(),
                ApiError::TokenStore(_) => {
                    "Could not access secure storage for your session.".to_string()
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the server. Please try again.".to_string()
                }
            },
            AppError::Io(_) => {
                "A file operation failed. Please check file permissions.".to_string()
            }
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and requires user acknowledgment.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::Api(ApiError::Unauthorized(_))
                | AppError::Api(ApiError::InvalidUrl(_))
                | AppError::Api(ApiError::TokenStore(_))
                | AppError::Terminal(_)
        )
    }

    /// A title for the error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Configuration Error",
            AppError::Api(ApiError::Unauthorized(_)) => "Session Expired",
            AppError::Api(_) => "Request Failed",
            AppError::Io(_) => "File Error",
            AppError::Terminal(_) => "Terminal Error",
            AppError::Other(_) => "Error",
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::Parse(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix ~/.config/taskdeck/config.toml or remove it to use defaults.")
            }
            AppError::Api(ApiError::Unauthorized(_)) => Some("Press Enter to return to sign in."),
            AppError::Api(ApiError::Network(_)) => {
                Some("Check that the backend is running and the profile's api_url is correct.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::from_status(StatusCode::UNAUTHORIZED, "").into();
        assert!(matches!(app_err, AppError::Api(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_user_message_uses_backend_detail() {
        let err = AppError::Api(ApiError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"detail":"Only admins can manage users"}"#,
        ));
        assert_eq!(err.user_message(), "Only admins can manage users");
    }

    #[test]
    fn test_user_message_unauthorized_fallback() {
        let err = AppError::Api(ApiError::from_status(StatusCode::UNAUTHORIZED, ""));
        assert!(err.user_message().contains("session has expired"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "duplicate profile".to_string(),
        ));
        assert!(err.user_message().contains("duplicate profile"));
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Api(ApiError::from_status(StatusCode::UNAUTHORIZED, "")).is_critical());
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::Api(ApiError::TokenStore("locked".to_string())).is_critical());
    }

    #[test]
    fn test_validation_errors_are_not_critical() {
        let err = AppError::Api(ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"title":["This field is required."]}"#,
        ));
        assert!(!err.is_critical());
        assert_eq!(err.title(), "Request Failed");
    }

    #[test]
    fn test_suggested_action_unauthorized() {
        let err = AppError::Api(ApiError::from_status(StatusCode::UNAUTHORIZED, ""));
        assert!(err.suggested_action().unwrap().contains("sign in"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert_eq!(err.user_message(), "Terminal error: test error");
        assert!(err.is_critical());
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
        assert!(!err.is_critical());
    }
}
