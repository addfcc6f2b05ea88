//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing keys, token lifetimes, session cookies
//! - `cache` - Redis connection and command deadlines
//! - `rate_limit` - layered admission windows
//! - `server` - HTTP bind address and database connection

pub mod auth;
pub mod cache;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{JwtConfig, SessionConfig};
pub use cache::CacheConfig;
pub use rate_limit::{RateLimitConfig, RateRule};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// JWT signing and verification configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Redis cache configuration (revocation denylist)
    pub cache: CacheConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            jwt: JwtConfig::default(),
            session: SessionConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            jwt: JwtConfig::from_env(),
            session: SessionConfig::from_env(),
            cache: CacheConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
