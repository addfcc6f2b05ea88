//! Bcrypt implementation of the password hashing port

use tracing::warn;

use tg_core::errors::{DomainError, DomainResult};
use tg_core::services::PasswordHasher;

/// Password hasher backed by bcrypt
///
/// A corrupt stored hash is reported as an error, never a panic: login must
/// stay up even when a row has been damaged.
#[derive(Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Creates a hasher with the default bcrypt cost
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Creates a hasher with an explicit cost (lower costs for tests)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            warn!("Password hashing failed: {}", e);
            DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            }
        })
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| {
            warn!("Password verification failed on a stored hash: {}", e);
            DomainError::Internal {
                message: format!("Password verification failed: {}", e),
            }
        })
    }
}
