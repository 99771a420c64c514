//! Persistent storage for the session's access and refresh tokens.
//!
//! Tokens live in the OS keyring, one entry per profile and key. An
//! in-memory store backs tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use super::error::{ApiError, Result};

/// The keyring service name for taskdeck tokens.
const KEYRING_SERVICE: &str = "taskdeck";

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// A key/value store for session tokens.
///
/// Implementations must be safe to share between the UI loop and the
/// background tasks that issue requests.
pub trait TokenStore: Send + Sync {
    /// Read a value. Missing keys and unreadable entries yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// The stored access token, if any.
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY)
    }

    /// The stored refresh token, if any.
    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY)
    }

    /// Store both tokens of a freshly issued pair.
    fn store_pair(&self, access: &str, refresh: &str) -> Result<()> {
        self.set(ACCESS_TOKEN_KEY, access)?;
        self.set(REFRESH_TOKEN_KEY, refresh)
    }

    /// Remove both tokens.
    ///
    /// Both removals are attempted even if the first one fails.
    fn clear(&self) -> Result<()> {
        let access = self.remove(ACCESS_TOKEN_KEY);
        let refresh = self.remove(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}

/// Token store backed by the OS keyring.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    /// The profile the tokens belong to.
    profile: String,
}

impl KeyringTokenStore {
    /// Create a store for the given profile.
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    /// The keyring account name for a key.
    fn account(&self, key: &str) -> String {
        format!("{}:{}", self.profile, key)
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, &self.account(key))
            .map_err(|e| ApiError::TokenStore(format!("failed to access keyring: {}", e)))
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        let entry = match self.entry(key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, "{}", e);
                return None;
            }
        };

        match entry.get_password() {
            Ok(value) => Some(value),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(key, "failed to read token: {}", e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| ApiError::TokenStore(format!("failed to store {}: {}", key, e)))?;
        debug!(key, profile = %self.profile, "Stored token");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ApiError::TokenStore(format!(
                "failed to delete {}: {}",
                key, e
            ))),
        }
    }
}

/// Token store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding an access token.
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|_| ApiError::TokenStore("token store lock poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|_| ApiError::TokenStore("token store lock poisoned".to_string()))?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.access_token().is_none());

        store.store_pair("access-1", "refresh-1").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn test_memory_store_clear_removes_both_keys() {
        let store = MemoryTokenStore::new();
        store.store_pair("a", "r").unwrap();
        store.clear().unwrap();
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        assert!(store.get(REFRESH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_memory_store_remove_missing_key_is_ok() {
        let store = MemoryTokenStore::new();
        assert!(store.remove(ACCESS_TOKEN_KEY).is_ok());
    }

    #[test]
    fn test_with_access_token() {
        let store = MemoryTokenStore::with_access_token("abc");
        assert_eq!(store.access_token().as_deref(), Some("abc"));
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn test_keyring_account_is_profile_scoped() {
        let store = KeyringTokenStore::new("work");
        assert_eq!(store.account(ACCESS_TOKEN_KEY), "work:access_token");
        assert_eq!(store.account(REFRESH_TOKEN_KEY), "work:refresh_token");
    }
}
