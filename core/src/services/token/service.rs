//! Token issuance and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::{debug, warn};

use crate::domain::entities::token::{Claims, Session};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenIssuerConfig;
use super::key_manager::Rs256KeyManager;

/// Issues and verifies RS256-signed JWTs
///
/// Stateless: a token is the only proof of a session, and any replica
/// holding the same keypair verifies it identically. Revocation is the
/// session layer's concern, not this type's.
pub struct TokenIssuer {
    key_manager: Rs256KeyManager,
    config: TokenIssuerConfig,
    validation: Validation,
}

impl TokenIssuer {
    /// Creates a new token issuer
    pub fn new(key_manager: Rs256KeyManager, config: TokenIssuerConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        // Expiry is exact: a token one second past `exp` is already dead.
        validation.leeway = 0;

        Self {
            key_manager,
            config,
            validation,
        }
    }

    /// Generates a token for `subject` that expires after `lifetime`
    ///
    /// # Errors
    ///
    /// Returns `TokenError::TokenGenerationFailed` if signing fails.
    pub fn generate(&self, subject: &str, lifetime: Duration) -> DomainResult<String> {
        let claims = Claims::new(subject, Utc::now() + lifetime);

        let token = encode(
            &Header::new(Algorithm::RS256),
            &claims,
            self.key_manager.encoding_key(),
        )
        .map_err(|e| {
            warn!("Token signing failed: {}", e);
            DomainError::Token(TokenError::TokenGenerationFailed)
        })?;

        debug!(subject = %subject, exp = claims.exp, "Generated token");
        Ok(token)
    }

    /// Generates a short-lived access token for `subject`
    pub fn generate_access_token(&self, subject: &str) -> DomainResult<String> {
        self.generate(subject, Duration::seconds(self.config.access_token_expiry))
    }

    /// Generates a long-lived refresh token for `subject`
    pub fn generate_refresh_token(&self, subject: &str) -> DomainResult<String> {
        self.generate(subject, Duration::seconds(self.config.refresh_token_expiry))
    }

    /// Issues a fresh access/refresh pair for `subject`
    pub fn issue_session(&self, subject: &str) -> DomainResult<Session> {
        let access_token = self.generate_access_token(subject)?;
        let refresh_token = self.generate_refresh_token(subject)?;

        Ok(Session::with_expiry(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
            self.config.refresh_token_expiry,
        ))
    }

    /// Verifies a token's signature and expiry, returning its claims
    ///
    /// # Errors
    ///
    /// - `TokenError::TokenExpired` when `exp` is in the past (no leeway)
    /// - `TokenError::InvalidSignature` when the signature does not match
    /// - `TokenError::InvalidTokenFormat` for anything else malformed
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let data = decode::<Claims>(token, self.key_manager.decoding_key(), &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                    ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(data.claims)
    }

    /// Returns the issuer's configured lifetimes
    pub fn config(&self) -> &TokenIssuerConfig {
        &self.config
    }
}
