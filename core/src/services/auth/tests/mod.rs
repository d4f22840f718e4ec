//! Unit tests for the authentication service

use std::sync::Arc;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository};
use crate::services::auth::{hash_password, AuthService, AuthServiceConfig};
use crate::services::token::{FixedClock, TokenService, TokenServiceConfig};

const PASSWORD: &str = "Str0ng!pass";

struct Fixture {
    repo: InMemoryAccountRepository,
    tokens: Arc<TokenService>,
    clock: Arc<FixedClock>,
    service: AuthService,
}

fn fixture() -> Fixture {
    let repo = InMemoryAccountRepository::new();
    let clock = Arc::new(FixedClock::at(1_700_000_000));
    let tokens = Arc::new(TokenService::with_clock(
        TokenServiceConfig::new("auth-secret"),
        clock.clone(),
    ));
    let config = AuthServiceConfig {
        bcrypt_cost: 4,
        ..Default::default()
    };
    let service = AuthService::new(Arc::new(repo.clone()), tokens.clone(), config);
    Fixture {
        repo,
        tokens,
        clock,
        service,
    }
}

async fn seed(f: &Fixture, username: &str, status: AccountStatus) -> Account {
    let hash = hash_password(PASSWORD, 4).await.unwrap();
    let account = Account::new(username, format!("{}@example.com", username), hash)
        .with_role(Role::ReadWrite)
        .with_status(status);
    f.repo.create(account).await.unwrap()
}

fn auth_error<T: std::fmt::Debug>(result: Result<T, DomainError>) -> AuthError {
    match result {
        Err(DomainError::Auth(e)) => e,
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_issues_token_pair() {
    let f = fixture();
    let alice = seed(&f, "alice", AccountStatus::Active).await;

    let pair = f.service.login("alice", PASSWORD).await.unwrap();

    assert_eq!(pair.expires_in, 900);
    assert_eq!(pair.token_type, "Bearer");
    let claims = f.tokens.verify(&pair.access_token).unwrap();
    assert_eq!(claims.id, alice.id);
    assert_eq!(claims.role, Role::ReadWrite);
    assert!(f.tokens.verify_refresh(&pair.refresh_token).is_ok());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let f = fixture();
    seed(&f, "alice", AccountStatus::Active).await;

    let wrong_password = f.service.login("alice", "Wr0ng!pass").await;
    assert!(matches!(auth_error(wrong_password), AuthError::InvalidCredentials));

    let unknown_user = f.service.login("nobody", PASSWORD).await;
    assert!(matches!(auth_error(unknown_user), AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_reports_inactive_status_after_password_check() {
    let f = fixture();
    seed(&f, "pending", AccountStatus::Pending).await;
    seed(&f, "disabled", AccountStatus::Disabled).await;

    let result = f.service.login("pending", PASSWORD).await;
    assert!(matches!(auth_error(result), AuthError::AccountPending));

    let result = f.service.login("disabled", PASSWORD).await;
    assert!(matches!(auth_error(result), AuthError::AccountDisabled));

    // A wrong password never reveals the status
    let result = f.service.login("disabled", "Wr0ng!pass").await;
    assert!(matches!(auth_error(result), AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_register_creates_pending_read_only_account() {
    let f = fixture();

    let account = f
        .service
        .register("new_user", "new@example.com", PASSWORD)
        .await
        .unwrap();

    assert_eq!(account.status, AccountStatus::Pending);
    assert_eq!(account.role, Role::ReadOnly);
    assert_ne!(account.password_hash, PASSWORD);

    // Cannot log in until approved
    let result = f.service.login("new_user", PASSWORD).await;
    assert!(matches!(auth_error(result), AuthError::AccountPending));
}

#[tokio::test]
async fn test_register_rejects_taken_username() {
    let f = fixture();
    seed(&f, "alice", AccountStatus::Active).await;

    let result = f.service.register("alice", "other@example.com", PASSWORD).await;
    assert!(matches!(auth_error(result), AuthError::UsernameTaken));
}

#[tokio::test]
async fn test_register_enforces_policy() {
    let f = fixture();

    let result = f.service.register("x", "x@example.com", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { .. }))
    ));

    let result = f.service.register("valid_name", "v@example.com", "weakpassword").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::WeakPassword { .. }))
    ));
    assert!(f.repo.is_empty().await);
}

#[tokio::test]
async fn test_register_can_be_closed() {
    let repo = InMemoryAccountRepository::new();
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("s")));
    let config = AuthServiceConfig {
        bcrypt_cost: 4,
        allow_registration: false,
    };
    let service = AuthService::new(Arc::new(repo), tokens, config);

    let result = service.register("alice", "a@example.com", PASSWORD).await;
    assert!(matches!(auth_error(result), AuthError::Forbidden));
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let f = fixture();
    let alice = seed(&f, "alice", AccountStatus::Active).await;
    let pair = f.service.login("alice", PASSWORD).await.unwrap();

    f.clock.advance(3600);
    let grant = f.service.refresh(&pair.refresh_token).await.unwrap();

    assert_eq!(grant.expires_in, 900);
    let claims = f.tokens.verify(&grant.access_token).unwrap();
    assert_eq!(claims.id, alice.id);
    assert_eq!(claims.iat, 1_700_000_000 + 3600);
}

#[tokio::test]
async fn test_refresh_rejects_access_token_and_garbage() {
    let f = fixture();
    seed(&f, "alice", AccountStatus::Active).await;
    let pair = f.service.login("alice", PASSWORD).await.unwrap();

    let result = f.service.refresh(&pair.access_token).await;
    assert!(matches!(auth_error(result), AuthError::InvalidRefreshToken));

    let result = f.service.refresh("garbage").await;
    assert!(matches!(auth_error(result), AuthError::InvalidRefreshToken));
}

#[tokio::test]
async fn test_refresh_rechecks_account() {
    let f = fixture();
    let alice = seed(&f, "alice", AccountStatus::Active).await;
    let pair = f.service.login("alice", PASSWORD).await.unwrap();

    f.repo
        .update_status(alice.id, AccountStatus::Disabled)
        .await
        .unwrap();
    let result = f.service.refresh(&pair.refresh_token).await;
    assert!(matches!(auth_error(result), AuthError::AccountDisabled));

    f.repo.remove(alice.id).await;
    let result = f.service.refresh(&pair.refresh_token).await;
    assert!(matches!(auth_error(result), AuthError::InvalidRefreshToken));
}
