//! Account lifecycle operations built over the token and storage ports

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::token::Session;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::{RevocationStore, UserStore};
use crate::services::auth::PasswordHasher;
use crate::services::token::TokenIssuer;

/// Registration, login, refresh, and logout
///
/// Login failures are deliberately indistinguishable: an unknown email and
/// a wrong password both surface as `AuthenticationFailed`.
pub struct AuthService<U, R, H>
where
    U: UserStore,
    R: RevocationStore,
    H: PasswordHasher,
{
    issuer: Arc<TokenIssuer>,
    users: Arc<U>,
    revocations: Arc<R>,
    hasher: Arc<H>,
}

impl<U, R, H> AuthService<U, R, H>
where
    U: UserStore,
    R: RevocationStore,
    H: PasswordHasher,
{
    /// Creates a new auth service
    pub fn new(issuer: Arc<TokenIssuer>, users: Arc<U>, revocations: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            issuer,
            users,
            revocations,
            hasher,
        }
    }

    /// Creates an account and opens its first session
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` for a duplicate email.
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<Session> {
        if self.users.find_by_subject(email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self.users.create(User::new(email, password_hash)).await?;

        info!(subject = %user.email, "Registered new account");
        self.issuer.issue_session(&user.email)
    }

    /// Verifies credentials and opens a session
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Session> {
        let user = self
            .users
            .find_by_subject(email)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;

        if user.is_blocked {
            warn!(subject = %email, "Login attempt on blocked account");
            return Err(AuthError::UserBlocked.into());
        }

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::AuthenticationFailed.into());
        }

        self.users.update_last_login(user.id).await?;

        info!(subject = %user.email, "Login succeeded");
        self.issuer.issue_session(&user.email)
    }

    /// Trades a live refresh token for a fresh pair
    ///
    /// The presented refresh token is retired before its replacement is
    /// minted; at no point are two refresh tokens live for this exchange.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<Session> {
        if self.revocations.is_revoked(refresh_token).await? {
            return Err(TokenError::TokenRevoked.into());
        }

        let claims = self.issuer.verify(refresh_token)?;

        let user = self
            .users
            .find_by_subject(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.is_blocked {
            return Err(AuthError::UserBlocked.into());
        }

        self.revocations.revoke(refresh_token).await?;

        info!(subject = %claims.sub, "Refreshed session");
        self.issuer.issue_session(&claims.sub)
    }

    /// Revokes every token presented at logout
    ///
    /// Revocation is idempotent, so a replayed logout is harmless.
    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> DomainResult<()> {
        if let Some(token) = access_token {
            self.revocations.revoke(token).await?;
        }
        if let Some(token) = refresh_token {
            self.revocations.revoke(token).await?;
        }

        info!("Logout completed");
        Ok(())
    }
}
