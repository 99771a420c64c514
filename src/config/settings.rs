//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Default event-loop tick in milliseconds.
const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The name of the default profile to use.
    pub default_profile: Option<String>,
    /// How often the UI loop wakes up to drain results, in milliseconds.
    pub tick_rate_ms: u64,
    /// Request timeout in seconds. Absent means no timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            request_timeout_secs: None,
        }
    }
}
