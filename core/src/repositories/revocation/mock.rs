//! In-memory implementation of RevocationStore for testing

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::{DomainError, TokenError};

use super::store::RevocationStore;

/// Mock revocation store for testing
///
/// Records the order in which tokens were revoked so tests can assert the
/// revoke-then-issue ordering of rotation, and can be switched into a
/// failing mode to exercise the fail-closed path.
#[derive(Clone, Default)]
pub struct MockRevocationStore {
    revoked: Arc<Mutex<HashSet<String>>>,
    revocation_log: Arc<Mutex<Vec<String>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockRevocationStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a cache outage: every subsequent call fails
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Tokens revoked so far, in revocation order
    pub fn revocation_log(&self) -> Vec<String> {
        self.revocation_log.lock().unwrap().clone()
    }

    /// Number of revoked tokens
    pub fn len(&self) -> usize {
        self.revoked.lock().unwrap().len()
    }

    /// True if nothing has been revoked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TokenError::RevocationUnavailable.into());
        }
        self.revoked.lock().unwrap().insert(token.to_string());
        self.revocation_log.lock().unwrap().push(token.to_string());
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TokenError::RevocationUnavailable.into());
        }
        Ok(self.revoked.lock().unwrap().contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_then_is_revoked() {
        let store = MockRevocationStore::new();
        assert!(!store.is_revoked("t1").await.unwrap());

        store.revoke("t1").await.unwrap();
        assert!(store.is_revoked("t1").await.unwrap());
        // Idempotently readable: a second check still reports revoked.
        assert!(store.is_revoked("t1").await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = MockRevocationStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.is_revoked("t1").await,
            Err(DomainError::Token(TokenError::RevocationUnavailable))
        ));
        assert!(matches!(
            store.revoke("t1").await,
            Err(DomainError::Token(TokenError::RevocationUnavailable))
        ));
    }

    #[tokio::test]
    async fn test_revocation_log_preserves_order() {
        let store = MockRevocationStore::new();
        store.revoke("first").await.unwrap();
        store.revoke("second").await.unwrap();

        assert_eq!(store.revocation_log(), vec!["first", "second"]);
    }
}
