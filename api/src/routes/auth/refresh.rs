//! Handler for POST /api/v1/auth/refresh

use actix_web::{web, HttpRequest, HttpResponse};

use tg_core::errors::AuthError;
use tg_core::repositories::{RevocationStore, UserStore};
use tg_core::services::PasswordHasher;

use super::{session_response, AppState};
use crate::dto::RefreshRequest;
use crate::handlers::error::error_response;

/// Trades a live refresh token for a rotated pair
///
/// The token is taken from the JSON body when present, falling back to the
/// refresh cookie. The spent token is revoked before the new pair is
/// minted, so it cannot be replayed.
pub async fn refresh<U, R, H>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, H>>,
    body: Option<web::Json<RefreshRequest>>,
) -> HttpResponse
where
    U: UserStore + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    let from_body = body.and_then(|b| b.into_inner().refresh_token);
    let from_cookie = req
        .cookie(&state.session_config.refresh_cookie_name)
        .map(|c| c.value().to_string());

    let refresh_token = match from_body.or(from_cookie) {
        Some(token) => token,
        None => return error_response(&AuthError::Unauthenticated.into()),
    };

    match state.auth_service.refresh(&refresh_token).await {
        Ok(session) => session_response(HttpResponse::Ok(), &session, &state.session_config),
        Err(error) => error_response(&error),
    }
}
