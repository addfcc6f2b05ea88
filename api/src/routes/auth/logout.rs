//! Handler for POST /api/v1/auth/logout

use actix_web::{http::header, web, HttpRequest, HttpResponse};

use tg_core::repositories::{RevocationStore, UserStore};
use tg_core::services::PasswordHasher;

use super::AppState;
use crate::cookies::clear_cookie;
use crate::dto::LogoutResponse;
use crate::handlers::error::error_response;
use crate::middleware::auth::RequestSubject;

/// Revokes every presented token and clears the session cookies
///
/// Sits behind the session middleware, so the request has already been
/// admitted; revocation here is what makes the logout stick across
/// replicas sharing the denylist.
pub async fn logout<U, R, H>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, H>>,
    _subject: RequestSubject,
) -> HttpResponse
where
    U: UserStore + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    let access_token = bearer_token(&req).or_else(|| {
        req.cookie(&state.session_config.access_cookie_name)
            .map(|c| c.value().to_string())
    });
    let refresh_token = req
        .cookie(&state.session_config.refresh_cookie_name)
        .map(|c| c.value().to_string());

    match state
        .auth_service
        .logout(access_token.as_deref(), refresh_token.as_deref())
        .await
    {
        Ok(()) => HttpResponse::Ok()
            .cookie(clear_cookie(
                &state.session_config,
                &state.session_config.access_cookie_name,
            ))
            .cookie(clear_cookie(
                &state.session_config,
                &state.session_config.refresh_cookie_name,
            ))
            .json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            }),
        Err(error) => error_response(&error),
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").or_else(|| value.strip_prefix("bearer "))?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
