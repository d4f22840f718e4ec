//! Unit tests for domain error types

use crate::domain::entities::token::TokenType;
use crate::errors::{AuthError, DomainError, RemoteError, SandboxError, TokenError};

#[test]
fn test_transient_classification() {
    assert!(RemoteError::ConnectionRefused("econnrefused".into()).is_transient());
    assert!(RemoteError::ConnectionLost("reset".into()).is_transient());
    assert!(RemoteError::Timeout.is_transient());

    assert!(!RemoteError::NotFound("/upload/x".into()).is_transient());
    assert!(!RemoteError::PermissionDenied("/upload".into()).is_transient());
    assert!(!RemoteError::AlreadyExists("/upload/a".into()).is_transient());
    assert!(!RemoteError::AuthenticationRejected.is_transient());
    assert!(!RemoteError::TransferAborted("eof".into()).is_transient());
    assert!(!RemoteError::Protocol("bad packet".into()).is_transient());
    assert!(!RemoteError::Cancelled.is_transient());
    assert!(!RemoteError::PayloadTooLarge { limit: 1 }.is_transient());
}

#[test]
fn test_wrong_token_type_message() {
    let error = TokenError::WrongTokenType {
        expected: TokenType::Refresh,
        actual: TokenType::Access,
    };
    assert_eq!(error.to_string(), "Wrong token type: expected refresh, got access");
}

#[test]
fn test_token_invalid_keeps_source() {
    use std::error::Error;

    let error = AuthError::TokenInvalid(TokenError::Expired);
    assert!(error.source().is_some());
    assert!(error.to_string().contains("Token expired"));
}

#[test]
fn test_domain_error_conversions() {
    let error: DomainError = SandboxError::PathTraversal { path: "../etc".into() }.into();
    assert!(matches!(error, DomainError::Sandbox(SandboxError::PathTraversal { .. })));

    let error: DomainError = RemoteError::Timeout.into();
    assert!(matches!(error, DomainError::Remote(RemoteError::Timeout)));

    let error = DomainError::internal("pool closed");
    assert_eq!(error.to_string(), "Internal error: pool closed");
}
