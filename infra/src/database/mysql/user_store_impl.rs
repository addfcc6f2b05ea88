//! MySQL implementation of the UserStore trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::debug;
use uuid::Uuid;

use tg_core::domain::entities::user::User;
use tg_core::errors::{AuthError, DomainError};
use tg_core::repositories::UserStore;

/// MySQL implementation of UserStore
///
/// Uuids are stored as CHAR(36); timestamps as UTC DATETIME.
pub struct MySqlUserStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserStore {
    /// Create a new MySQL user store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::column_error("id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            email: row
                .try_get("email")
                .map_err(|e| Self::column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| Self::column_error("password_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::column_error("updated_at", e))?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| Self::column_error("last_login_at", e))?,
            is_blocked: row
                .try_get("is_blocked")
                .map_err(|e| Self::column_error("is_blocked", e))?,
        })
    }

    fn column_error(column: &str, e: sqlx::Error) -> DomainError {
        DomainError::Database {
            message: format!("Failed to get {}: {}", column, e),
        }
    }

    fn query_error(e: sqlx::Error) -> DomainError {
        DomainError::Database {
            message: format!("Query failed: {}", e),
        }
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash,
                   created_at, updated_at, last_login_at, is_blocked
            FROM users
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::query_error)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, password_hash,
                               created_at, updated_at, last_login_at, is_blocked)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.is_blocked)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(subject = %user.email, "Created user row");
                Ok(user)
            }
            // The unique index on email is the authority on duplicates.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::UserAlreadyExists.into())
            }
            Err(e) => Err(Self::query_error(e)),
        }
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET last_login_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let now = Utc::now();
        let result = sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::query_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {id}"),
            });
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
