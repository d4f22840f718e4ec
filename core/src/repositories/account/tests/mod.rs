//! Unit tests for the in-memory account repository

use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::errors::{AuthError, DomainError};
use crate::repositories::account::{AccountFilter, AccountRepository, InMemoryAccountRepository};

fn account(name: &str) -> Account {
    Account::new(name, format!("{}@example.com", name), "hash")
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryAccountRepository::new();
    let alice = account("alice");

    repo.create(alice.clone()).await.unwrap();

    let by_id = repo.find_by_id(alice.id).await.unwrap();
    assert_eq!(by_id.map(|a| a.username), Some("alice".to_string()));

    let by_name = repo.find_by_username("alice").await.unwrap();
    assert_eq!(by_name.map(|a| a.id), Some(alice.id));

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let repo = InMemoryAccountRepository::new();
    repo.create(account("alice")).await.unwrap();

    let result = repo.create(account("alice")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UsernameTaken))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_update_status_and_role() {
    let repo = InMemoryAccountRepository::new();
    let alice = repo.create(account("alice")).await.unwrap();

    let updated = repo
        .update_status(alice.id, AccountStatus::Active)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, AccountStatus::Active);

    let updated = repo.update_role(alice.id, Role::Admin).await.unwrap().unwrap();
    assert_eq!(updated.role, Role::Admin);

    assert!(repo
        .update_role(Uuid::new_v4(), Role::Admin)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_list_filters_and_windows() {
    let repo = InMemoryAccountRepository::with_accounts(vec![
        account("a").with_status(AccountStatus::Active),
        account("b").with_status(AccountStatus::Active).with_role(Role::Admin),
        account("c"),
        account("d").with_status(AccountStatus::Disabled),
    ]);

    let active = AccountFilter {
        status: Some(AccountStatus::Active),
        limit: 10,
        ..Default::default()
    };
    assert_eq!(repo.list(&active).await.unwrap().len(), 2);
    assert_eq!(repo.count(&active).await.unwrap(), 2);

    let admins = AccountFilter {
        role: Some(Role::Admin),
        limit: 10,
        ..Default::default()
    };
    let listed = repo.list(&admins).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username, "b");

    let window = AccountFilter {
        limit: 2,
        offset: 3,
        ..Default::default()
    };
    assert_eq!(repo.list(&window).await.unwrap().len(), 1);
    assert_eq!(repo.count(&window).await.unwrap(), 4);
}
