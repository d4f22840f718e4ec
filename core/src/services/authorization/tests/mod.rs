//! Unit tests for the authorization gate

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::domain::entities::token::TokenSubject;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{AccountFilter, AccountRepository, InMemoryAccountRepository};
use crate::services::authorization::{bearer_token, AuthorizationGate};
use crate::services::token::{FixedClock, TokenService, TokenServiceConfig};

const T0: i64 = 1_700_000_000;
const ANY: &[Role] = &[];
const WRITERS: &[Role] = &[Role::ReadWrite, Role::Admin];

struct Fixture {
    clock: Arc<FixedClock>,
    tokens: Arc<TokenService>,
    repo: InMemoryAccountRepository,
    gate: AuthorizationGate,
}

fn fixture() -> Fixture {
    let clock = Arc::new(FixedClock::at(T0));
    let tokens = Arc::new(TokenService::with_clock(
        TokenServiceConfig::new("gate-secret"),
        clock.clone(),
    ));
    let repo = InMemoryAccountRepository::new();
    let gate = AuthorizationGate::new(tokens.clone(), Arc::new(repo.clone()));
    Fixture {
        clock,
        tokens,
        repo,
        gate,
    }
}

async fn seed(f: &Fixture, name: &str, role: Role, status: AccountStatus) -> Account {
    let account = Account::new(name, format!("{}@example.com", name), "hash")
        .with_role(role)
        .with_status(status);
    f.repo.create(account).await.unwrap()
}

fn header_for(f: &Fixture, account: &Account) -> String {
    let subject = TokenSubject::new(account.username.clone(), account.id, account.role);
    format!("Bearer {}", f.tokens.sign_access(&subject).unwrap())
}

fn auth_error(result: Result<impl std::fmt::Debug, DomainError>) -> AuthError {
    match result {
        Err(DomainError::Auth(e)) => e,
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[test]
fn test_bearer_token_parsing() {
    assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
    assert_eq!(bearer_token(Some("Bearer   abc  ")), Some("abc"));
    assert_eq!(bearer_token(Some("Bearer ")), None);
    assert_eq!(bearer_token(Some("Basic abc")), None);
    assert_eq!(bearer_token(Some("abc")), None);
    assert_eq!(bearer_token(None), None);
}

#[tokio::test]
async fn test_active_account_is_authorized() {
    let f = fixture();
    let alice = seed(&f, "alice", Role::ReadWrite, AccountStatus::Active).await;

    let principal = f
        .gate
        .authorize(Some(&header_for(&f, &alice)), WRITERS)
        .await
        .unwrap();

    assert_eq!(principal.id, alice.id);
    assert_eq!(principal.username, "alice");
    assert_eq!(principal.email, "alice@example.com");
    assert_eq!(principal.role, Role::ReadWrite);
    assert_eq!(principal.status, AccountStatus::Active);
}

#[tokio::test]
async fn test_missing_or_malformed_header() {
    let f = fixture();

    assert!(matches!(
        auth_error(f.gate.authorize(None, ANY).await),
        AuthError::MissingToken
    ));
    assert!(matches!(
        auth_error(f.gate.authorize(Some("Token abc"), ANY).await),
        AuthError::MissingToken
    ));
}

#[tokio::test]
async fn test_invalid_token_variants() {
    let f = fixture();
    let alice = seed(&f, "alice", Role::ReadOnly, AccountStatus::Active).await;

    let result = f.gate.authorize(Some("Bearer junk"), ANY).await;
    assert!(matches!(
        auth_error(result),
        AuthError::TokenInvalid(TokenError::Malformed)
    ));

    let subject = TokenSubject::new("alice", alice.id, alice.role);
    let refresh = format!("Bearer {}", f.tokens.sign_refresh(&subject).unwrap());
    let result = f.gate.authorize(Some(&refresh), ANY).await;
    assert!(matches!(
        auth_error(result),
        AuthError::TokenInvalid(TokenError::WrongTokenType { .. })
    ));

    let header = header_for(&f, &alice);
    f.clock.advance(900);
    let result = f.gate.authorize(Some(&header), ANY).await;
    assert!(matches!(
        auth_error(result),
        AuthError::TokenInvalid(TokenError::Expired)
    ));
}

#[tokio::test]
async fn test_deleted_account_authorizes_nothing() {
    let f = fixture();
    let alice = seed(&f, "alice", Role::Admin, AccountStatus::Active).await;
    let header = header_for(&f, &alice);

    f.repo.remove(alice.id).await;

    let result = f.gate.authorize(Some(&header), ANY).await;
    assert!(matches!(auth_error(result), AuthError::AccountNotFound));
}

#[tokio::test]
async fn test_status_checked_before_role() {
    let f = fixture();
    let pending = seed(&f, "pending", Role::ReadOnly, AccountStatus::Pending).await;
    let disabled = seed(&f, "disabled", Role::ReadOnly, AccountStatus::Disabled).await;

    // Neither role would pass WRITERS, but status wins
    let result = f.gate.authorize(Some(&header_for(&f, &pending)), WRITERS).await;
    assert!(matches!(auth_error(result), AuthError::AccountPending));

    let result = f.gate.authorize(Some(&header_for(&f, &disabled)), WRITERS).await;
    assert!(matches!(auth_error(result), AuthError::AccountDisabled));
}

#[tokio::test]
async fn test_role_outside_required_set_is_forbidden() {
    let f = fixture();
    let reader = seed(&f, "reader", Role::ReadOnly, AccountStatus::Active).await;
    let header = header_for(&f, &reader);

    let result = f.gate.authorize(Some(&header), WRITERS).await;
    assert!(matches!(auth_error(result), AuthError::Forbidden));

    assert!(f.gate.authorize(Some(&header), ANY).await.is_ok());
}

#[tokio::test]
async fn test_mid_session_disable_takes_effect() {
    let f = fixture();
    let alice = seed(&f, "alice", Role::ReadWrite, AccountStatus::Active).await;
    let header = header_for(&f, &alice);

    assert!(f.gate.authorize(Some(&header), WRITERS).await.is_ok());

    f.repo
        .update_status(alice.id, AccountStatus::Disabled)
        .await
        .unwrap();

    let result = f.gate.authorize(Some(&header), WRITERS).await;
    assert!(matches!(auth_error(result), AuthError::AccountDisabled));
}

#[tokio::test]
async fn test_demotion_uses_live_role_not_token_role() {
    let f = fixture();
    let alice = seed(&f, "alice", Role::Admin, AccountStatus::Active).await;
    let header = header_for(&f, &alice);

    f.repo.update_role(alice.id, Role::ReadOnly).await.unwrap();

    let result = f.gate.authorize(Some(&header), &[Role::Admin]).await;
    assert!(matches!(auth_error(result), AuthError::Forbidden));

    let principal = f.gate.authorize(Some(&header), ANY).await.unwrap();
    assert_eq!(principal.role, Role::ReadOnly);
}

struct FailingRepository;

#[async_trait]
impl AccountRepository for FailingRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Account>, DomainError> {
        Err(DomainError::internal("connection pool exhausted"))
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<Account>, DomainError> {
        Err(DomainError::internal("connection pool exhausted"))
    }

    async fn create(&self, _account: Account) -> Result<Account, DomainError> {
        Err(DomainError::internal("connection pool exhausted"))
    }

    async fn update_status(
        &self,
        _id: Uuid,
        _status: AccountStatus,
    ) -> Result<Option<Account>, DomainError> {
        Err(DomainError::internal("connection pool exhausted"))
    }

    async fn update_role(&self, _id: Uuid, _role: Role) -> Result<Option<Account>, DomainError> {
        Err(DomainError::internal("connection pool exhausted"))
    }

    async fn list(&self, _filter: &AccountFilter) -> Result<Vec<Account>, DomainError> {
        Err(DomainError::internal("connection pool exhausted"))
    }

    async fn count(&self, _filter: &AccountFilter) -> Result<u64, DomainError> {
        Err(DomainError::internal("connection pool exhausted"))
    }
}

#[tokio::test]
async fn test_store_failure_is_internal_not_success() {
    let clock = Arc::new(FixedClock::at(T0));
    let tokens = Arc::new(TokenService::with_clock(
        TokenServiceConfig::new("gate-secret"),
        clock,
    ));
    let gate = AuthorizationGate::new(tokens.clone(), Arc::new(FailingRepository));
    let subject = TokenSubject::new("alice", Uuid::new_v4(), Role::Admin);
    let header = format!("Bearer {}", tokens.sign_access(&subject).unwrap());

    let result = gate.authorize(Some(&header), ANY).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
