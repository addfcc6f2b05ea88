//! User store trait defining the interface for user persistence.
//!
//! The session machine only ever needs to resolve a token subject back to an
//! account; the auth service additionally creates accounts and records
//! logins. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by their token subject (email)
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that subject
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Record a successful login for the user
    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
