//! Authentication endpoints
//!
//! - `POST /api/v1/auth/register` - create an account, open a session
//! - `POST /api/v1/auth/login` - verify credentials, open a session
//! - `POST /api/v1/auth/refresh` - trade a refresh token for a fresh pair
//! - `POST /api/v1/auth/logout` - revoke the presented tokens

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use actix_web::{HttpResponse, HttpResponseBuilder};
use std::sync::Arc;

use tg_core::domain::entities::token::Session;
use tg_core::repositories::{RevocationStore, UserStore};
use tg_core::services::{AuthService, PasswordHasher, SessionService};
use tg_shared::{JwtConfig, SessionConfig};

use crate::cookies::{access_cookie, refresh_cookie};
use crate::dto::AuthResponse;

/// Shared application state injected into every handler
pub struct AppState<U, R, H>
where
    U: UserStore,
    R: RevocationStore,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, R, H>>,
    pub session_service: Arc<SessionService<U, R>>,
    pub session_config: SessionConfig,
    pub jwt_config: JwtConfig,
}

/// Finishes a successful auth response: token pair in the body, the same
/// pair as session cookies
pub(crate) fn session_response(
    mut builder: HttpResponseBuilder,
    session: &Session,
    config: &SessionConfig,
) -> HttpResponse {
    builder
        .cookie(access_cookie(
            config,
            &session.access_token,
            session.access_expires_in,
        ))
        .cookie(refresh_cookie(
            config,
            &session.refresh_token,
            session.refresh_expires_in,
        ))
        .json(AuthResponse::from(session))
}
