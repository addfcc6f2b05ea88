//! Tests for the auth service


use crate::errors::{DomainError, DomainResult};
use crate::services::auth::PasswordHasher;

/// Deterministic, reversible "hash" for tests
pub(crate) struct MockPasswordHasher {
    pub fail: bool,
}

impl MockPasswordHasher {
    pub fn new() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        if self.fail {
            return Err(DomainError::Internal {
                message: "hashing unavailable".to_string(),
            });
        }
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        if self.fail {
            return Err(DomainError::Internal {
                message: "hashing unavailable".to_string(),
            });
        }
        Ok(hash == format!("hashed:{password}"))
    }
}
