//! # Tokengate Infrastructure
//!
//! Concrete implementations of the `tg_core` ports:
//! - **cache**: Redis-backed revocation denylist
//! - **database**: MySQL user store via sqlx
//! - **security**: bcrypt password hashing

pub mod cache;
pub mod database;
pub mod security;

use thiserror::Error;

/// Infrastructure-level errors, converted to `DomainError` at the port
/// boundary
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A cache command exceeded its deadline
    #[error("Cache command timed out after {timeout_ms}ms")]
    CacheTimeout { timeout_ms: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
