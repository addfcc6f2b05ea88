//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// One admission window: at most `limit` requests per `window_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateRule {
    /// Maximum requests allowed inside the window
    pub limit: u32,

    /// Window duration in seconds
    pub window_seconds: u64,
}

impl RateRule {
    pub const fn new(limit: u32, window_seconds: u64) -> Self {
        Self {
            limit,
            window_seconds,
        }
    }
}

/// Rate limiting configuration
///
/// Rules are applied independently per client key and combined with AND
/// semantics: a request is admitted only if it fits every rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Layered windows (sustained + burst)
    pub rules: Vec<RateRule>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            // Sustained ceiling plus a tight burst window
            rules: vec![RateRule::new(1000, 60), RateRule::new(100, 1)],
        }
    }
}

impl RateLimitConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let enabled = std::env::var("RATE_LIMIT_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.enabled);

        Self {
            enabled,
            rules: defaults.rules,
        }
    }

    /// The longest configured window, which bounds how long a client key must
    /// be retained before its counters can be dropped
    pub fn longest_window_seconds(&self) -> u64 {
        self.rules
            .iter()
            .map(|r| r.window_seconds)
            .max()
            .unwrap_or(0)
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            rules: vec![RateRule::new(10000, 60), RateRule::new(1000, 1)],
        }
    }
}

fn default_enabled() -> bool {
    true
}
