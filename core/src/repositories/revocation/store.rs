//! Revocation denylist trait.
//!
//! The denylist is shared out-of-process so every server instance observes
//! the same revocations. Entries are keyed (one TTL-bounded entry per token);
//! membership checks are idempotent reads, never destructive pops, so a
//! revoked token stays revoked no matter how many times it is re-checked.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Shared, TTL-bounded denylist of token strings
///
/// Implementations must be safe under arbitrary concurrent callers and must
/// bound each call with a deadline; an unreachable store surfaces as
/// `TokenError::RevocationUnavailable`, which callers treat as a rejection
/// (fail closed - admitting on an unknown revocation status would reopen
/// every revoked session during an outage).
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Add a token to the denylist
    ///
    /// The entry's TTL must be at least the token's remaining validity
    /// window; implementations use a fixed ceiling above every token
    /// lifetime.
    async fn revoke(&self, token: &str) -> Result<(), DomainError>;

    /// Point-in-time membership check
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;
}
