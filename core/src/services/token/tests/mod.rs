//! Unit tests for the token service

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::domain::entities::token::{TokenSubject, TokenType};
use crate::errors::TokenError;
use crate::services::token::{FixedClock, TokenService, TokenServiceConfig};

const T0: i64 = 1_700_000_000;

fn service_at(clock: Arc<FixedClock>) -> TokenService {
    TokenService::with_clock(TokenServiceConfig::new("test-secret"), clock)
}

fn subject() -> TokenSubject {
    TokenSubject::new("alice", Uuid::new_v4(), Role::ReadWrite)
}

#[test]
fn test_access_token_round_trip() {
    let clock = Arc::new(FixedClock::at(T0));
    let service = service_at(clock);
    let subject = subject();

    let token = service.sign_access(&subject).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.id, subject.account_id);
    assert_eq!(claims.role, Role::ReadWrite);
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.iat, T0);
    assert_eq!(claims.exp, T0 + 900);
    assert_eq!(claims.iss, "sftp-gateway");
}

#[test]
fn test_access_token_expires_after_fifteen_minutes() {
    let clock = Arc::new(FixedClock::at(T0));
    let service = service_at(clock.clone());
    let token = service.sign_access(&subject()).unwrap();

    clock.advance(899);
    assert!(service.verify(&token).is_ok());

    clock.advance(1);
    assert_eq!(service.verify(&token), Err(TokenError::Expired));
}

#[test]
fn test_refresh_token_lives_seven_days() {
    let clock = Arc::new(FixedClock::at(T0));
    let service = service_at(clock.clone());
    let token = service.sign_refresh(&subject()).unwrap();

    clock.advance(7 * 24 * 3600 - 1);
    assert!(service.verify_refresh(&token).is_ok());

    clock.advance(1);
    assert_eq!(service.verify_refresh(&token), Err(TokenError::Expired));
}

#[test]
fn test_token_types_are_not_interchangeable() {
    let service = service_at(Arc::new(FixedClock::at(T0)));
    let subject = subject();
    let access = service.sign_access(&subject).unwrap();
    let refresh = service.sign_refresh(&subject).unwrap();

    assert_eq!(
        service.verify_refresh(&access),
        Err(TokenError::WrongTokenType {
            expected: TokenType::Refresh,
            actual: TokenType::Access,
        })
    );
    assert_eq!(
        service.verify(&refresh),
        Err(TokenError::WrongTokenType {
            expected: TokenType::Access,
            actual: TokenType::Refresh,
        })
    );
}

#[test]
fn test_foreign_secret_fails_signature() {
    let clock = Arc::new(FixedClock::at(T0));
    let ours = service_at(clock.clone());
    let theirs = TokenService::with_clock(TokenServiceConfig::new("other-secret"), clock);

    let token = theirs.sign_access(&subject()).unwrap();
    assert_eq!(ours.verify(&token), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_issuer_mismatch_is_malformed() {
    let clock = Arc::new(FixedClock::at(T0));
    let ours = service_at(clock.clone());
    let config = TokenServiceConfig {
        issuer: "someone-else".to_string(),
        ..TokenServiceConfig::new("test-secret")
    };
    let theirs = TokenService::with_clock(config, clock);

    let token = theirs.sign_access(&subject()).unwrap();
    assert_eq!(ours.verify(&token), Err(TokenError::Malformed));
}

#[test]
fn test_garbage_is_malformed() {
    let service = service_at(Arc::new(FixedClock::at(T0)));

    assert_eq!(service.verify(""), Err(TokenError::Malformed));
    assert_eq!(service.verify("not.a.jwt"), Err(TokenError::Malformed));
    assert_eq!(service.verify_refresh("abc"), Err(TokenError::Malformed));
}

#[test]
fn test_tampered_payload_fails_signature() {
    let service = service_at(Arc::new(FixedClock::at(T0)));
    let token = service.sign_access(&subject()).unwrap();
    let other = service
        .sign_access(&TokenSubject::new("mallory", Uuid::new_v4(), Role::Admin))
        .unwrap();

    // Splice mallory's payload onto alice's signature
    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    assert_eq!(service.verify(&forged), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_refresh_issues_access_for_same_subject() {
    let clock = Arc::new(FixedClock::at(T0));
    let service = service_at(clock.clone());
    let subject = subject();
    let refresh = service.sign_refresh(&subject).unwrap();

    clock.advance(3600);
    let access = service.refresh(&refresh).unwrap();
    let claims = service.verify(&access).unwrap();

    assert_eq!(claims.subject(), subject);
    assert_eq!(claims.iat, T0 + 3600);
    assert_eq!(claims.exp, T0 + 3600 + 900);

    // Not rotated: the same refresh token still works
    assert!(service.refresh(&refresh).is_ok());
}

#[test]
fn test_refresh_rejects_access_token() {
    let service = service_at(Arc::new(FixedClock::at(T0)));
    let access = service.sign_access(&subject()).unwrap();

    assert!(matches!(
        service.refresh(&access),
        Err(TokenError::WrongTokenType { .. })
    ));
}

#[test]
fn test_issue_pair() {
    let service = service_at(Arc::new(FixedClock::at(T0)));
    let pair = service.issue_pair(&subject()).unwrap();

    assert_eq!(pair.expires_in, 900);
    assert_eq!(pair.token_type, "Bearer");
    assert!(service.verify(&pair.access_token).is_ok());
    assert!(service.verify_refresh(&pair.refresh_token).is_ok());
}
