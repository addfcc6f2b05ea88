//! Session admission middleware
//!
//! Extracts credentials from the `Authorization` header or the session
//! cookies, runs them through the core admission state machine, and either
//! forwards the request with its verified subject attached or short-circuits
//! with a structured 401/5xx. When the state machine rotates an expired
//! access token, the replacement is set as a cookie on the response.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use tg_core::errors::{AuthError, DomainError};
use tg_core::repositories::{RevocationStore, UserStore};
use tg_core::services::{Credentials, SessionService};
use tg_shared::{JwtConfig, SessionConfig};

use crate::cookies::{access_cookie, clear_cookie};
use crate::handlers::error::error_response_builder;

/// Verified subject injected into admitted requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSubject(pub String);

impl FromRequest for RequestSubject {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<RequestSubject>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Authentication required")),
        )
    }
}

/// Session admission middleware factory
pub struct SessionAuth<U, R>
where
    U: UserStore,
    R: RevocationStore,
{
    sessions: Arc<SessionService<U, R>>,
    session_config: SessionConfig,
    access_max_age: i64,
}

impl<U, R> SessionAuth<U, R>
where
    U: UserStore,
    R: RevocationStore,
{
    /// Creates the middleware over a shared session service
    pub fn new(
        sessions: Arc<SessionService<U, R>>,
        session_config: SessionConfig,
        jwt_config: &JwtConfig,
    ) -> Self {
        Self {
            sessions,
            session_config,
            access_max_age: jwt_config.access_token_expiry,
        }
    }
}

impl<S, B, U, R> Transform<S, ServiceRequest> for SessionAuth<U, R>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: UserStore + 'static,
    R: RevocationStore + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S, U, R>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            sessions: Arc::clone(&self.sessions),
            session_config: self.session_config.clone(),
            access_max_age: self.access_max_age,
        }))
    }
}

/// Session admission middleware service
pub struct SessionAuthMiddleware<S, U, R>
where
    U: UserStore,
    R: RevocationStore,
{
    service: Rc<S>,
    sessions: Arc<SessionService<U, R>>,
    session_config: SessionConfig,
    access_max_age: i64,
}

impl<S, B, U, R> Service<ServiceRequest> for SessionAuthMiddleware<S, U, R>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: UserStore + 'static,
    R: RevocationStore + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let sessions = Arc::clone(&self.sessions);
        let session_config = self.session_config.clone();
        let access_max_age = self.access_max_age;

        Box::pin(async move {
            let credentials = match extract_credentials(&req, &session_config) {
                Ok(credentials) => credentials,
                Err(error) => {
                    let response = error_response_builder(&error).finish();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            match sessions.authenticate(credentials).await {
                Ok(admission) => {
                    req.extensions_mut()
                        .insert(RequestSubject(admission.subject));

                    let mut res = service.call(req).await?.map_into_left_body();

                    if let Some(token) = admission.rotated_access {
                        let cookie = access_cookie(&session_config, &token, access_max_age);
                        if let Err(e) = res.response_mut().add_cookie(&cookie) {
                            log::warn!("Failed to attach rotated access cookie: {}", e);
                        }
                    }

                    Ok(res)
                }
                Err(error) => {
                    let mut builder = error_response_builder(&error);

                    // A token for a vanished account is useless; take the
                    // cookies down with the 401.
                    if matches!(error, DomainError::Auth(AuthError::UserNotFound)) {
                        builder = builder
                            .cookie(clear_cookie(
                                &session_config,
                                &session_config.access_cookie_name,
                            ))
                            .cookie(clear_cookie(
                                &session_config,
                                &session_config.refresh_cookie_name,
                            ));
                    }

                    Ok(req.into_response(builder.finish()).map_into_right_body())
                }
            }
        })
    }
}

/// Turns one request's transport into a `Credentials` value
///
/// Scheme errors are decided here: a non-Bearer `Authorization` header or a
/// header without a token segment is `MalformedCredentials`, not a panic.
fn extract_credentials(
    req: &ServiceRequest,
    config: &SessionConfig,
) -> Result<Credentials, DomainError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| DomainError::Auth(AuthError::MalformedCredentials))?;

        let mut parts = value.splitn(2, ' ');
        let scheme = parts.next().unwrap_or_default();
        let token = parts.next().map(str::trim).unwrap_or_default();

        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AuthError::MalformedCredentials.into());
        }

        return Ok(Credentials::Bearer(token.to_string()));
    }

    let access = req
        .cookie(&config.access_cookie_name)
        .map(|c| c.value().to_string());
    let refresh = req
        .cookie(&config.refresh_cookie_name)
        .map(|c| c.value().to_string());

    if access.is_none() && refresh.is_none() {
        Ok(Credentials::Missing)
    } else {
        Ok(Credentials::CookiePair { access, refresh })
    }
}
