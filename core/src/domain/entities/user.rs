//! User entity. The email doubles as the token subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address; the stable subject carried in every token
    pub email: String,

    /// Password hash (opaque to the domain layer)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Whether the account is blocked from authenticating
    pub is_blocked: bool,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
            is_blocked: false,
        }
    }

    /// Records a successful login
    pub fn touch_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Blocks the account
    pub fn block(&mut self) {
        self.is_blocked = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("a@b.com", "$2b$12$hash");

        assert_eq!(user.email, "a@b.com");
        assert!(user.last_login_at.is_none());
        assert!(!user.is_blocked);
    }

    #[test]
    fn test_touch_login() {
        let mut user = User::new("a@b.com", "hash");
        user.touch_login();

        assert!(user.last_login_at.is_some());
        assert!(user.updated_at >= user.created_at);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("a@b.com", "secret-hash");
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("secret-hash"));
    }
}
