//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use tg_core::repositories::{RevocationStore, UserStore};
use tg_core::services::PasswordHasher;

use super::{session_response, AppState};
use crate::dto::LoginRequest;
use crate::handlers::error::{error_response, validation_error_response};

/// Verifies credentials and opens a session
///
/// Unknown email and wrong password both answer 401 with the same code.
pub async fn login<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserStore + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.login(&body.email, &body.password).await {
        Ok(session) => session_response(HttpResponse::Ok(), &session, &state.session_config),
        Err(error) => error_response(&error),
    }
}
