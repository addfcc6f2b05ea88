//! JWT and session cookie configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// Tokens are signed with an RSA private key and verified with the matching
/// public key, so stateless replicas only ever need the public half.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Path to the PEM-encoded RSA private key (signing)
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key (verification)
    pub public_key_path: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("certs/private.pem"),
            public_key_path: String::from("certs/public.pem"),
            access_token_expiry: 300,    // 5 minutes
            refresh_token_expiry: 86400, // 24 hours
        }
    }
}

impl JwtConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.private_key_path),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.public_key_path),
            access_token_expiry: std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in hours
    pub fn with_refresh_expiry_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiry = hours * 3600;
        self
    }
}

/// Session cookie configuration
///
/// The canonical cookie pair is `access_token` / `refresh_token`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Cookie carrying the access token
    pub access_cookie_name: String,

    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,

    /// Cookie Secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("access_token"),
            refresh_cookie_name: String::from("refresh_token"),
            secure: false, // set COOKIE_SECURE=true behind TLS
            http_only: default_http_only(),
        }
    }
}

impl SessionConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.secure),
            ..defaults
        }
    }
}

fn default_http_only() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 300);
        assert_eq!(config.refresh_token_expiry, 86400);
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::default()
            .with_access_expiry_minutes(10)
            .with_refresh_expiry_hours(48);

        assert_eq!(config.access_token_expiry, 600);
        assert_eq!(config.refresh_token_expiry, 172800);
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.access_cookie_name, "access_token");
        assert_eq!(config.refresh_cookie_name, "refresh_token");
        assert!(config.http_only);
        assert!(!config.secure);
    }
}
