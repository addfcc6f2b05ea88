//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - RS256 key management for asymmetric signing
//! - Access and refresh token generation
//! - Strict (zero-leeway) verification with a typed error taxonomy

mod config;
mod key_manager;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use config::TokenIssuerConfig;
pub use key_manager::Rs256KeyManager;
pub use service::TokenIssuer;
