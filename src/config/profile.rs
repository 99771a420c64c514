//! API profile configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// A backend profile.
///
/// Profiles name a project-management backend. Session tokens are kept
/// separately in the OS keychain, scoped by profile name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The versioned API root (e.g. "http://localhost:8000/api").
    pub api_url: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_url: api_url.into(),
        }
    }

    /// Validate this profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if the name is
    /// empty or contains whitespace, or the URL is empty or not http(s).
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.api_url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': API URL cannot be empty",
                self.name
            )));
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': API URL must start with http:// or https://",
                self.name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile() {
        let profile = Profile::new("local", "http://localhost:8000/api");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Profile::new("", "http://localhost:8000/api").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name cannot be empty"));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let result = Profile::new("my work", "https://pm.example.com/api").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot contain whitespace"));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = Profile::new("work", "").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("API URL cannot be empty"));
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let result = Profile::new("work", "pm.example.com/api").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with http"));
    }

    #[test]
    fn test_profile_serialization() {
        let profile = Profile::new("work", "https://pm.example.com/api");
        let toml_str = toml::to_string(&profile).unwrap();
        let parsed: Profile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, profile);
    }
}
