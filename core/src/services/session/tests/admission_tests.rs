use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockRevocationStore, MockUserStore, RevocationStore, UserStore};
use crate::services::session::{Credentials, SessionService};
use crate::services::token::tests::test_issuer;
use crate::services::token::TokenIssuer;

const SUBJECT: &str = "user@example.com";

struct Harness {
    issuer: Arc<TokenIssuer>,
    users: MockUserStore,
    revocations: MockRevocationStore,
    service: SessionService<MockUserStore, MockRevocationStore>,
}

fn harness() -> Harness {
    let issuer = Arc::new(test_issuer());
    let users = MockUserStore::with_users([User::new(SUBJECT, "hash")]);
    let revocations = MockRevocationStore::new();

    let service = SessionService::new(
        Arc::clone(&issuer),
        Arc::new(users.clone()),
        Arc::new(revocations.clone()),
    );

    Harness {
        issuer,
        users,
        revocations,
        service,
    }
}

fn expired_token(issuer: &TokenIssuer) -> String {
    issuer.generate(SUBJECT, Duration::seconds(-10)).unwrap()
}

#[tokio::test]
async fn test_missing_credentials_rejected() {
    let h = harness();

    let result = h.service.authenticate(Credentials::Missing).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::Unauthenticated))
    ));
    assert!(h.revocations.is_empty());
}

#[tokio::test]
async fn test_empty_cookie_pair_rejected() {
    let h = harness();

    let result = h
        .service
        .authenticate(Credentials::CookiePair {
            access: None,
            refresh: None,
        })
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::Unauthenticated))
    ));
}

#[tokio::test]
async fn test_valid_bearer_admitted() {
    let h = harness();
    let token = h.issuer.generate_access_token(SUBJECT).unwrap();

    let admission = h
        .service
        .authenticate(Credentials::Bearer(token))
        .await
        .unwrap();

    assert_eq!(admission.subject, SUBJECT);
    assert!(admission.rotated_access.is_none());
}

#[tokio::test]
async fn test_revoked_bearer_rejected() {
    let h = harness();
    let token = h.issuer.generate_access_token(SUBJECT).unwrap();
    h.revocations.revoke(&token).await.unwrap();

    let result = h.service.authenticate(Credentials::Bearer(token)).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_expired_bearer_rejected() {
    let h = harness();
    let token = expired_token(&h.issuer);

    let result = h.service.authenticate(Credentials::Bearer(token)).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[tokio::test]
async fn test_bearer_for_deleted_user_revoked_and_rejected() {
    let h = harness();
    let token = h.issuer.generate_access_token(SUBJECT).unwrap();

    let user = h.users.find_by_subject(SUBJECT).await.unwrap().unwrap();
    h.users.delete(user.id).await.unwrap();

    let result = h
        .service
        .authenticate(Credentials::Bearer(token.clone()))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));

    // The orphaned token must be dead for its remaining lifetime.
    assert!(h.revocations.is_revoked(&token).await.unwrap());
}

#[tokio::test]
async fn test_bearer_for_blocked_user_rejected() {
    let h = harness();
    let token = h.issuer.generate_access_token(SUBJECT).unwrap();

    let mut user = h.users.find_by_subject(SUBJECT).await.unwrap().unwrap();
    user.block();
    h.users.delete(user.id).await.unwrap();
    h.users.create(user).await.unwrap();

    let result = h.service.authenticate(Credentials::Bearer(token)).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserBlocked))
    ));
}

#[tokio::test]
async fn test_valid_access_cookie_admitted_without_rotation() {
    let h = harness();
    let session = h.issuer.issue_session(SUBJECT).unwrap();

    let admission = h
        .service
        .authenticate(Credentials::CookiePair {
            access: Some(session.access_token),
            refresh: Some(session.refresh_token),
        })
        .await
        .unwrap();

    assert_eq!(admission.subject, SUBJECT);
    assert!(admission.rotated_access.is_none());
    assert!(h.revocations.is_empty());
}

#[tokio::test]
async fn test_expired_access_with_live_refresh_rotates() {
    let h = harness();
    let old_access = expired_token(&h.issuer);
    let refresh = h.issuer.generate_refresh_token(SUBJECT).unwrap();

    let admission = h
        .service
        .authenticate(Credentials::CookiePair {
            access: Some(old_access.clone()),
            refresh: Some(refresh),
        })
        .await
        .unwrap();

    assert_eq!(admission.subject, SUBJECT);
    let new_access = admission.rotated_access.expect("rotation must mint a token");
    assert_ne!(new_access, old_access);

    // The replacement is immediately usable.
    let claims = h.issuer.verify(&new_access).unwrap();
    assert_eq!(claims.sub, SUBJECT);

    // The spent access token was revoked, and only it.
    assert_eq!(h.revocations.revocation_log(), vec![old_access]);
}

#[tokio::test]
async fn test_missing_access_with_live_refresh_rotates() {
    let h = harness();
    let refresh = h.issuer.generate_refresh_token(SUBJECT).unwrap();

    let admission = h
        .service
        .authenticate(Credentials::CookiePair {
            access: None,
            refresh: Some(refresh),
        })
        .await
        .unwrap();

    assert!(admission.rotated_access.is_some());
    // No access token was presented, so nothing needed revoking.
    assert!(h.revocations.is_empty());
}

#[tokio::test]
async fn test_both_tokens_expired_rejected() {
    let h = harness();
    let access = expired_token(&h.issuer);
    let refresh = h.issuer.generate(SUBJECT, Duration::seconds(-5)).unwrap();

    let result = h
        .service
        .authenticate(Credentials::CookiePair {
            access: Some(access),
            refresh: Some(refresh),
        })
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
    assert!(h.revocations.is_empty());
}

#[tokio::test]
async fn test_revoked_refresh_blocks_rotation() {
    let h = harness();
    let access = expired_token(&h.issuer);
    let refresh = h.issuer.generate_refresh_token(SUBJECT).unwrap();
    h.revocations.revoke(&refresh).await.unwrap();

    let result = h
        .service
        .authenticate(Credentials::CookiePair {
            access: Some(access),
            refresh: Some(refresh),
        })
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_rotation_for_deleted_user_revokes_presented_tokens() {
    let h = harness();
    let access = expired_token(&h.issuer);
    let refresh = h.issuer.generate_refresh_token(SUBJECT).unwrap();

    let user = h.users.find_by_subject(SUBJECT).await.unwrap().unwrap();
    h.users.delete(user.id).await.unwrap();

    let result = h
        .service
        .authenticate(Credentials::CookiePair {
            access: Some(access.clone()),
            refresh: Some(refresh.clone()),
        })
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));

    assert!(h.revocations.is_revoked(&access).await.unwrap());
    assert!(h.revocations.is_revoked(&refresh).await.unwrap());
}

#[tokio::test]
async fn test_unreachable_denylist_fails_closed() {
    let h = harness();
    let token = h.issuer.generate_access_token(SUBJECT).unwrap();
    h.revocations.set_unavailable(true);

    // A perfectly valid token is still rejected when revocation status
    // cannot be established.
    let result = h.service.authenticate(Credentials::Bearer(token)).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RevocationUnavailable))
    ));
}

#[tokio::test]
async fn test_tampered_access_cookie_rejected_without_rotation() {
    let h = harness();
    let mut access = h.issuer.generate_access_token(SUBJECT).unwrap();
    let refresh = h.issuer.generate_refresh_token(SUBJECT).unwrap();

    // Corrupt the signature segment.
    access.replace_range(access.len() - 4.., "AAAA");

    let result = h
        .service
        .authenticate(Credentials::CookiePair {
            access: Some(access),
            refresh: Some(refresh),
        })
        .await;

    // A forged token never falls through to the refresh path.
    assert!(matches!(
        result,
        Err(DomainError::Token(
            TokenError::InvalidSignature | TokenError::InvalidTokenFormat
        ))
    ));
    assert!(h.revocations.is_empty());
}
