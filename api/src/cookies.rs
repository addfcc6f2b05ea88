//! Session cookie construction
//!
//! One place defines how the access and refresh cookies look so the
//! middleware and the auth routes cannot drift apart. Both cookies are
//! HttpOnly and SameSite=Lax; `Secure` follows configuration.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use tg_shared::SessionConfig;

/// Builds the access token cookie
pub fn access_cookie(config: &SessionConfig, token: &str, max_age_seconds: i64) -> Cookie<'static> {
    session_cookie(
        config,
        config.access_cookie_name.clone(),
        token.to_string(),
        max_age_seconds,
    )
}

/// Builds the refresh token cookie
pub fn refresh_cookie(
    config: &SessionConfig,
    token: &str,
    max_age_seconds: i64,
) -> Cookie<'static> {
    session_cookie(
        config,
        config.refresh_cookie_name.clone(),
        token.to_string(),
        max_age_seconds,
    )
}

/// Builds an immediately-expiring cookie that clears `name` on the client
pub fn clear_cookie(config: &SessionConfig, name: &str) -> Cookie<'static> {
    session_cookie(config, name.to_string(), String::new(), 0)
}

fn session_cookie(
    config: &SessionConfig,
    name: String,
    value: String,
    max_age_seconds: i64,
) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_cookie_attributes() {
        let config = SessionConfig::default();
        let cookie = access_cookie(&config, "tok", 300);

        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(300)));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = SessionConfig::default();
        let cookie = clear_cookie(&config, "refresh_token");

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
