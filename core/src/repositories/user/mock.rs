//! In-memory implementation of UserStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::store::UserStore;

/// Mock user store for testing
#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MockUserStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store pre-populated with users
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        {
            let mut map = store.users.lock().unwrap();
            for user in users {
                map.insert(user.id, user);
            }
        }
        store
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// True if no users are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == subject).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&id) {
            Some(user) => {
                user.touch_login();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("user {id}"),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_subject() {
        let store = MockUserStore::with_users([User::new("a@b.com", "hash")]);

        let found = store.find_by_subject("a@b.com").await.unwrap();
        assert!(found.is_some());

        let missing = store.find_by_subject("nobody@b.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let store = MockUserStore::new();
        store.create(User::new("a@b.com", "h1")).await.unwrap();

        let result = store.create(User::new("a@b.com", "h2")).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::UserAlreadyExists))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_find_returns_none() {
        let user = User::new("a@b.com", "hash");
        let id = user.id;
        let store = MockUserStore::with_users([user]);

        assert!(store.delete(id).await.unwrap());
        assert!(store.find_by_subject("a@b.com").await.unwrap().is_none());
        assert!(!store.delete(id).await.unwrap());
    }
}
