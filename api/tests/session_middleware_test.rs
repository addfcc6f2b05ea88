//! Integration tests for the session admission middleware

mod common;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use chrono::Duration;

use tg_core::repositories::{RevocationStore, UserStore};
use tg_api::middleware::auth::{RequestSubject, SessionAuth};

use common::{Fixture, TEST_EMAIL};

/// Echo handler: answers with the subject the middleware attached
async fn whoami(subject: RequestSubject) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "subject": subject.0 }))
}

macro_rules! protected_app {
    ($fixture:expr) => {
        test::init_service(
            App::new().service(
                web::resource("/whoami")
                    .wrap(SessionAuth::new(
                        std::sync::Arc::clone(&$fixture.session_service),
                        $fixture.session_config.clone(),
                        &$fixture.jwt_config,
                    ))
                    .route(web::get().to(whoami)),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_no_credentials_rejected() {
    let fixture = Fixture::new();
    let app = protected_app!(fixture);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[actix_web::test]
async fn test_wrong_scheme_is_malformed_not_a_crash() {
    let fixture = Fixture::new();
    let app = protected_app!(fixture);

    for header in ["Token abc123", "Basic dXNlcjpwdw==", "Bearer", "Bearer   "] {
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header(("Authorization", header))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {header:?}");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "MALFORMED_CREDENTIALS", "header {header:?}");
    }
}

#[actix_web::test]
async fn test_valid_bearer_admitted() {
    let fixture = Fixture::new();
    let token = fixture.issuer.generate_access_token(TEST_EMAIL).unwrap();
    let app = protected_app!(fixture);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["subject"], TEST_EMAIL);
}

#[actix_web::test]
async fn test_revoked_bearer_rejected() {
    let fixture = Fixture::new();
    let token = fixture.issuer.generate_access_token(TEST_EMAIL).unwrap();
    fixture.revocations.revoke(&token).await.unwrap();
    let app = protected_app!(fixture);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");
}

#[actix_web::test]
async fn test_expired_access_cookie_rotates_and_sets_cookie() {
    let fixture = Fixture::new();
    let expired = fixture
        .issuer
        .generate(TEST_EMAIL, Duration::seconds(-10))
        .unwrap();
    let refresh = fixture.issuer.generate_refresh_token(TEST_EMAIL).unwrap();
    let app = protected_app!(fixture);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/whoami")
            .cookie(actix_web::cookie::Cookie::new("access_token", expired.clone()))
            .cookie(actix_web::cookie::Cookie::new("refresh_token", refresh))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);

    let rotated = resp
        .response()
        .cookies()
        .find(|c| c.name() == "access_token")
        .expect("rotation must set a new access cookie");
    assert_ne!(rotated.value(), expired);

    // The replacement verifies and carries the same subject.
    let claims = fixture.issuer.verify(rotated.value()).unwrap();
    assert_eq!(claims.sub, TEST_EMAIL);

    // The spent access token was revoked before the replacement was minted.
    assert_eq!(fixture.revocations.revocation_log(), vec![expired]);
}

#[actix_web::test]
async fn test_expired_pair_rejected() {
    let fixture = Fixture::new();
    let expired_access = fixture
        .issuer
        .generate(TEST_EMAIL, Duration::seconds(-10))
        .unwrap();
    let expired_refresh = fixture
        .issuer
        .generate(TEST_EMAIL, Duration::seconds(-5))
        .unwrap();
    let app = protected_app!(fixture);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/whoami")
            .cookie(actix_web::cookie::Cookie::new("access_token", expired_access))
            .cookie(actix_web::cookie::Cookie::new("refresh_token", expired_refresh))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[actix_web::test]
async fn test_deleted_user_gets_401_and_cleared_cookies() {
    let fixture = Fixture::new();
    let token = fixture.issuer.generate_access_token(TEST_EMAIL).unwrap();

    let user = fixture
        .users
        .find_by_subject(TEST_EMAIL)
        .await
        .unwrap()
        .unwrap();
    fixture.users.delete(user.id).await.unwrap();

    let app = protected_app!(fixture);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/whoami")
            .cookie(actix_web::cookie::Cookie::new("access_token", token.clone()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Both session cookies are taken down with the rejection.
    let cleared: Vec<_> = resp
        .response()
        .cookies()
        .filter(|c| c.value().is_empty())
        .map(|c| c.name().to_string())
        .collect();
    assert!(cleared.contains(&"access_token".to_string()));
    assert!(cleared.contains(&"refresh_token".to_string()));

    // And the orphaned token is dead.
    assert!(fixture.revocations.is_revoked(&token).await.unwrap());
}

#[actix_web::test]
async fn test_unreachable_denylist_fails_closed() {
    let fixture = Fixture::new();
    let token = fixture.issuer.generate_access_token(TEST_EMAIL).unwrap();
    fixture.revocations.set_unavailable(true);
    let app = protected_app!(fixture);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REVOCATION_UNAVAILABLE");
}
