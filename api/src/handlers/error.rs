//! Translation of domain errors into HTTP responses
//!
//! Every failed request carries the structured envelope from `tg_shared`:
//! machine code, human message, optional details, timestamp.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, HttpResponse, HttpResponseBuilder,
};
use serde_json::json;

use tg_core::errors::{AuthError, DomainError, TokenError};
use tg_shared::{error_codes, ErrorResponse};

/// Status and machine code for a domain error
pub fn status_and_code(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, error_codes::UNAUTHENTICATED)
            }
            AuthError::MalformedCredentials => {
                (StatusCode::UNAUTHORIZED, error_codes::MALFORMED_CREDENTIALS)
            }
            AuthError::AuthenticationFailed => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTHENTICATION_FAILED)
            }
            // A valid-looking token for a vanished account is still a 401;
            // the client's only recourse is to re-authenticate.
            AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, error_codes::USER_NOT_FOUND),
            AuthError::UserBlocked => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTHENTICATION_FAILED)
            }
            AuthError::UserAlreadyExists => {
                (StatusCode::CONFLICT, error_codes::USER_ALREADY_EXISTS)
            }
            AuthError::RateLimited { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMITED)
            }
        },
        DomainError::Token(token) => match token {
            TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED),
            TokenError::TokenRevoked => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_REVOKED),
            TokenError::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, error_codes::INVALID_SIGNATURE)
            }
            TokenError::InvalidTokenFormat => {
                (StatusCode::UNAUTHORIZED, error_codes::INVALID_TOKEN_FORMAT)
            }
            // Fail closed: an unreachable denylist rejects like a revoked
            // token rather than admitting blind.
            TokenError::RevocationUnavailable => {
                (StatusCode::UNAUTHORIZED, error_codes::REVOCATION_UNAVAILABLE)
            }
            TokenError::TokenGenerationFailed | TokenError::KeyLoadError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
        },
        DomainError::Validation { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_codes::VALIDATION_FAILED)
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Builds the HTTP response for a domain error
pub fn error_response(error: &DomainError) -> HttpResponse {
    error_response_builder(error).finish()
}

/// Response builder for a domain error, letting callers attach cookies
/// before the body is set
pub fn error_response_builder(error: &DomainError) -> ErrorResponseBuilder {
    let (status, code) = status_and_code(error);

    let mut body = ErrorResponse::new(code, public_message(error, status));
    if let DomainError::Auth(AuthError::RateLimited {
        retry_after_seconds,
    }) = error
    {
        body = body.with_detail("retry_after_seconds", json!(retry_after_seconds));
    }

    ErrorResponseBuilder {
        builder: HttpResponseBuilder::new(status),
        body,
    }
}

/// Partially-built error response; cookies may still be attached
pub struct ErrorResponseBuilder {
    builder: HttpResponseBuilder,
    body: ErrorResponse,
}

impl ErrorResponseBuilder {
    /// Attach a cookie to the pending response
    pub fn cookie(mut self, cookie: actix_web::cookie::Cookie<'_>) -> Self {
        self.builder.cookie(cookie);
        self
    }

    /// Finalize with the envelope body
    pub fn finish(mut self) -> HttpResponse {
        self.builder.json(self.body)
    }
}

/// 422 response for request body validation failures, with one detail per
/// offending field
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_FAILED, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.with_detail(field, json!(messages));
    }

    HttpResponse::UnprocessableEntity().json(body)
}

/// JSON extractor configuration
///
/// A wrong content type or an unparseable body answers 422 with the
/// structured envelope, not actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::new(error_codes::VALIDATION_FAILED, payload_message(&err));
        let response = HttpResponse::UnprocessableEntity().json(body);
        InternalError::from_response(err, response).into()
    })
}

fn payload_message(err: &JsonPayloadError) -> String {
    match err {
        JsonPayloadError::ContentType => "Expected application/json content".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Malformed JSON body: {}", e),
        _ => "Invalid request body".to_string(),
    }
}

/// Message safe to show a client. Internal failures never leak details.
fn public_message(error: &DomainError, status: StatusCode) -> String {
    if status.is_server_error() {
        "An internal error occurred".to_string()
    } else {
        error.to_string()
    }
}
