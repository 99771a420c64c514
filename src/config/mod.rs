//! Configuration management for taskdeck.
//!
//! This module handles loading, saving, and resolving the user's
//! configuration: backend profiles and application settings.

mod profile;
mod settings;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use profile::Profile;
pub use settings::Settings;

/// Name of the profile created when no config file exists.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// API URL of the profile created when no config file exists.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine the config directory")]
    NoConfigDir,

    /// Reading or writing the config file failed.
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config parsed but is inconsistent.
    #[error("invalid config: {0}")]
    ValidationError(String),

    /// A requested profile does not exist.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
    /// Backend profiles.
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            profiles: vec![Profile::new(DEFAULT_PROFILE_NAME, DEFAULT_API_URL)],
        }
    }
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux: `~/.config/taskdeck/config.toml`
    /// - macOS: `~/Library/Application Support/taskdeck/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\taskdeck\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("taskdeck").join("config.toml"))
    }

    /// Load the config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the config from a path.
    ///
    /// A missing file yields the default config. A present file is parsed
    /// and validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        debug!(profiles = config.profiles.len(), "Loaded config");
        Ok(config)
    }

    /// Save the config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save the config to a path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validate every profile, name uniqueness, and the default profile.
    pub fn validate(&self) -> Result<()> {
        if self.profiles.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one profile is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(default) = &self.settings.default_profile {
            if self.get_profile(default).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "default profile '{}' does not exist",
                    default
                )));
            }
        }

        Ok(())
    }

    /// Find a profile by name.
    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// The default profile: the configured one, else the first.
    pub fn get_default_profile(&self) -> Option<&Profile> {
        match &self.settings.default_profile {
            Some(name) => self.get_profile(name),
            None => self.profiles.first(),
        }
    }

    /// Resolve the profile to use, honoring an explicit name first.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<&Profile> {
        match name {
            Some(name) => self
                .get_profile(name)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string())),
            None => self
                .get_default_profile()
                .ok_or_else(|| ConfigError::ProfileNotFound(DEFAULT_PROFILE_NAME.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[settings]
default_profile = "work"
tick_rate_ms = 50

[[profiles]]
name = "local"
api_url = "http://localhost:8000/api"

[[profiles]]
name = "work"
api_url = "https://pm.example.com/api"
"#;

    #[test]
    fn test_default_config_has_local_profile() {
        let config = Config::default();
        let profile = config.get_default_profile().unwrap();
        assert_eq!(profile.name, "default");
        assert_eq!(profile.api_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_sample() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.tick_rate_ms, 50);
        assert_eq!(config.get_default_profile().unwrap().name, "work");
        assert_eq!(
            config.resolve_profile(Some("local")).unwrap().api_url,
            "http://localhost:8000/api"
        );
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.request_timeout_secs = Some(15);
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_duplicate_profiles_rejected() {
        let config = Config {
            settings: Settings::default(),
            profiles: vec![
                Profile::new("a", "http://localhost:8000/api"),
                Profile::new("a", "http://localhost:9000/api"),
            ],
        };
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("duplicate profile"));
    }

    #[test]
    fn test_unknown_default_profile_rejected() {
        let mut config = Config::default();
        config.settings.default_profile = Some("missing".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_profile() {
        let config = Config::default();
        assert!(matches!(
            config.resolve_profile(Some("nope")),
            Err(ConfigError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[profiles]\nname=").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
