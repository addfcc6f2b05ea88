//! Redis cache configuration

use serde::{Deserialize, Serialize};

/// Redis connection configuration for the shared revocation denylist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Per-command deadline in milliseconds
    ///
    /// Every revocation lookup sits on the request path, so a slow cache must
    /// time out rather than stall the whole pipeline.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Maximum number of retry attempts when connecting
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://127.0.0.1:6379"),
            command_timeout_ms: default_command_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            command_timeout_ms: std::env::var("REDIS_COMMAND_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.command_timeout_ms),
            max_retries: defaults.max_retries,
            retry_delay_ms: defaults.retry_delay_ms,
        }
    }
}

fn default_command_timeout_ms() -> u64 {
    2000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.command_timeout_ms, 2000);
        assert_eq!(config.max_retries, 3);
    }
}
