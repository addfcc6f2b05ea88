//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access token lifetime (5 minutes)
pub const ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 300;

/// Refresh token lifetime (24 hours)
pub const REFRESH_TOKEN_EXPIRY_SECONDS: i64 = 86400;

/// How long a revocation entry must be retained (7 days).
///
/// This is a fixed ceiling above every token lifetime, so a revoked token can
/// never outlive its denylist entry while still being cryptographically
/// valid.
pub const REVOCATION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Claims structure for the JWT payload
///
/// The subject is the user's stable identifier (their email). Tokens carry
/// nothing else: issuance and expiry timestamps are the whole story, and the
/// access/refresh distinction is purely a matter of lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a token expiring at `expires_at`
    pub fn new(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.into(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Remaining validity window, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 {
            Duration::seconds(remaining)
        } else {
            Duration::zero()
        }
    }
}

/// A session: one short-lived access token paired with one long-lived
/// refresh token, both carrying the same subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl Session {
    /// Creates a new session with the default lifetimes
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self::with_expiry(
            access_token,
            refresh_token,
            ACCESS_TOKEN_EXPIRY_SECONDS,
            REFRESH_TOKEN_EXPIRY_SECONDS,
        )
    }

    /// Creates a new session with explicit lifetimes
    pub fn with_expiry(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
