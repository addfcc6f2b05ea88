//! Shared configuration and wire types for the Tokengate server
//!
//! This crate provides the pieces every other layer needs:
//! - Typed configuration (`AppConfig` and its sub-configs)
//! - The structured error envelope returned on every failed request

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, JwtConfig, RateLimitConfig, RateRule, ServerConfig, SessionConfig,
};
pub use types::response::{error_codes, ErrorResponse};
