//! Authentication request and response bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

use tg_core::domain::entities::token::Session;

/// Request body for POST /api/v1/auth/register
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address; becomes the token subject
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Plaintext password, hashed before it is stored
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Request body for POST /api/v1/auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for POST /api/v1/auth/refresh
///
/// The token may also arrive via the refresh cookie; the body wins when
/// both are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Token pair returned by register, login, and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<&Session> for AuthResponse {
    fn from(session: &Session) -> Self {
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: session.access_expires_in,
        }
    }
}

/// Response body for POST /api/v1/auth/logout
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "long enough password".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let req = RegisterRequest {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_auth_response_from_session() {
        let session = Session::new("acc".to_string(), "ref".to_string());
        let body = AuthResponse::from(&session);

        assert_eq!(body.token_type, "Bearer");
        assert_eq!(body.expires_in, session.access_expires_in);
    }
}
