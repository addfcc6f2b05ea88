//! Redis caching layer
//!
//! Holds the shared connection handling (retry, timeout, URL masking) and
//! the revocation denylist built on top of it.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;
