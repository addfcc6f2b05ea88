//! Domain-specific error types and error handling.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Malformed credentials")]
    MalformedCredentials,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User account is blocked")]
    UserBlocked,

    #[error("Rate limit exceeded")]
    RateLimited { retry_after_seconds: u64 },
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Failed to load signing keys: {message}")]
    KeyLoadError { message: String },

    /// The revocation denylist could not be consulted. The session machine
    /// treats this exactly like a revoked token: fail closed.
    #[error("Revocation store unavailable")]
    RevocationUnavailable,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// True for the failures a client can repair by re-authenticating
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Auth(
                AuthError::Unauthenticated
                    | AuthError::MalformedCredentials
                    | AuthError::AuthenticationFailed
                    | AuthError::UserNotFound
                    | AuthError::UserBlocked
            ) | DomainError::Token(
                TokenError::TokenExpired
                    | TokenError::InvalidTokenFormat
                    | TokenError::InvalidSignature
                    | TokenError::TokenRevoked
                    | TokenError::RevocationUnavailable
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_messages() {
        assert_eq!(TokenError::TokenExpired.to_string(), "Token expired");
        assert_eq!(TokenError::TokenRevoked.to_string(), "Token revoked");
    }

    #[test]
    fn test_domain_error_transparent_wrapping() {
        let err: DomainError = TokenError::TokenExpired.into();
        assert_eq!(err.to_string(), "Token expired");
        assert!(err.is_authentication_failure());
    }

    #[test]
    fn test_revocation_unavailable_is_authentication_failure() {
        // Fail closed: an unreachable denylist must reject, not admit.
        let err: DomainError = TokenError::RevocationUnavailable.into();
        assert!(err.is_authentication_failure());
    }

    #[test]
    fn test_internal_error_is_not_authentication_failure() {
        let err = DomainError::Internal {
            message: "boom".to_string(),
        };
        assert!(!err.is_authentication_failure());
    }
}
