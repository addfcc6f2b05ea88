//! Token issuer configuration

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_SECONDS, REFRESH_TOKEN_EXPIRY_SECONDS};

/// Configuration for the token issuer
#[derive(Debug, Clone)]
pub struct TokenIssuerConfig {
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl Default for TokenIssuerConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: ACCESS_TOKEN_EXPIRY_SECONDS,
            refresh_token_expiry: REFRESH_TOKEN_EXPIRY_SECONDS,
        }
    }
}

impl From<&tg_shared::JwtConfig> for TokenIssuerConfig {
    fn from(config: &tg_shared::JwtConfig) -> Self {
        Self {
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
        }
    }
}
