//! Handler for POST /api/v1/auth/register

use actix_web::{web, HttpResponse};
use validator::Validate;

use tg_core::repositories::{RevocationStore, UserStore};
use tg_core::services::PasswordHasher;

use super::{session_response, AppState};
use crate::dto::RegisterRequest;
use crate::handlers::error::{error_response, validation_error_response};

/// Creates an account and opens its first session
///
/// # Responses
/// - 201 with the token pair (also set as cookies)
/// - 409 when the email is already registered
/// - 422 on a malformed email or password
pub async fn register<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserStore + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.register(&body.email, &body.password).await {
        Ok(session) => session_response(HttpResponse::Created(), &session, &state.session_config),
        Err(error) => error_response(&error),
    }
}
