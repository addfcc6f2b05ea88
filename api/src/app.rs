//! Application factory
//!
//! Builds the actix-web `App` from shared state: middleware stack (logging,
//! CORS, rate limiting), the auth routes, and the session-protected logout.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use tg_core::repositories::{RevocationStore, UserStore};
use tg_core::services::PasswordHasher;
use tg_shared::{error_codes, ErrorResponse};

use crate::handlers::error::json_config;
use crate::middleware::{auth::SessionAuth, cors::create_cors, rate_limit::RateLimit};
use crate::routes::auth::{login::login, logout::logout, refresh::refresh, register::register, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, R, H>(
    app_state: web::Data<AppState<U, R, H>>,
    rate_limit: RateLimit,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserStore + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    let session_auth = SessionAuth::new(
        app_state.session_service.clone(),
        app_state.session_config.clone(),
        &app_state.jwt_config,
    );

    App::new()
        .app_data(app_state)
        .app_data(json_config())
        // Order matters: the limiter sees every request, admitted or not.
        .wrap(rate_limit)
        .wrap(create_cors())
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, R, H>))
                    .route("/login", web::post().to(login::<U, R, H>))
                    .route("/refresh", web::post().to(refresh::<U, R, H>))
                    .service(
                        web::resource("/logout")
                            .wrap(session_auth)
                            .route(web::post().to(logout::<U, R, H>)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Liveness probe
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tokengate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler with the structured envelope
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "Resource not found",
    ))
}
