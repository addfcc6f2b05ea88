//! Redis-backed revocation denylist

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use tg_core::domain::entities::token::REVOCATION_TTL_SECONDS;
use tg_core::errors::{DomainError, TokenError};
use tg_core::repositories::RevocationStore;

use super::redis_client::RedisClient;

/// Key prefix for revocation entries
const REVOKED_KEY_PREFIX: &str = "revoked:";

/// Shared revocation denylist over Redis
///
/// One key per revoked token: `revoked:<sha256(token)>` with a TTL longer
/// than any token lifetime, so an entry is only evicted once the token it
/// covers is cryptographically dead anyway. Membership is a constant-time
/// `EXISTS`; revocation is an idempotent `SET`. Concurrent revocations of
/// the same token land on the same key and are harmless.
///
/// Any cache failure surfaces as `RevocationUnavailable`: when revocation
/// status cannot be established, the session layer rejects.
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
    ttl_seconds: u64,
}

impl RedisRevocationStore {
    /// Creates a revocation store with the default TTL ceiling
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            ttl_seconds: REVOCATION_TTL_SECONDS,
        }
    }

    /// Creates a store whose TTL also covers the configured token lifetimes
    ///
    /// An operator may raise `JWT_REFRESH_TOKEN_EXPIRY` past the fixed
    /// ceiling; the entry must outlive whichever is longer, or a revoked
    /// token would come back to life when its entry lapses.
    pub fn covering_lifetimes(
        client: RedisClient,
        access_expiry_seconds: i64,
        refresh_expiry_seconds: i64,
    ) -> Self {
        Self {
            client,
            ttl_seconds: ttl_covering(access_expiry_seconds, refresh_expiry_seconds),
        }
    }

    /// Denylist key for a token: the token itself never reaches Redis
    fn key_for(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{}{:x}", REVOKED_KEY_PREFIX, hasher.finalize())
    }
}

/// Entry TTL for the given token lifetimes: the fixed ceiling, raised when a
/// configured lifetime exceeds it
fn ttl_covering(access_expiry_seconds: i64, refresh_expiry_seconds: i64) -> u64 {
    let longest = access_expiry_seconds.max(refresh_expiry_seconds).max(0) as u64;
    REVOCATION_TTL_SECONDS.max(longest)
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        let key = Self::key_for(token);

        self.client
            .set_with_expiry(&key, "1", self.ttl_seconds)
            .await
            .map_err(|e| {
                warn!("Revocation write failed: {}", e);
                DomainError::Token(TokenError::RevocationUnavailable)
            })?;

        debug!("Revoked token");
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        let key = Self::key_for(token);

        self.client.exists(&key).await.map_err(|e| {
            warn!("Revocation lookup failed: {}", e);
            DomainError::Token(TokenError::RevocationUnavailable)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_prefixed_sha256_hex() {
        let key = RedisRevocationStore::key_for("some.jwt.token");

        assert!(key.starts_with(REVOKED_KEY_PREFIX));
        let digest = &key[REVOKED_KEY_PREFIX.len()..];
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_is_deterministic_and_token_free() {
        let token = "header.payload.signature";
        let a = RedisRevocationStore::key_for(token);
        let b = RedisRevocationStore::key_for(token);

        assert_eq!(a, b);
        assert!(!a.contains("payload"));
    }

    #[test]
    fn test_distinct_tokens_get_distinct_keys() {
        assert_ne!(
            RedisRevocationStore::key_for("token-a"),
            RedisRevocationStore::key_for("token-b")
        );
    }

    #[test]
    fn test_ttl_stays_at_ceiling_for_default_lifetimes() {
        assert_eq!(ttl_covering(300, 86400), REVOCATION_TTL_SECONDS);
    }

    #[test]
    fn test_ttl_rises_with_a_refresh_lifetime_past_the_ceiling() {
        // 30-day refresh tokens: the entry must live 30 days too.
        let thirty_days = 30 * 24 * 60 * 60;
        assert_eq!(ttl_covering(300, thirty_days), thirty_days as u64);
    }

    #[test]
    fn test_ttl_ignores_nonsense_negative_lifetimes() {
        assert_eq!(ttl_covering(-1, -1), REVOCATION_TTL_SECONDS);
    }
}
