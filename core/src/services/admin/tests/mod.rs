//! Unit tests for the admin service

use std::sync::Arc;
use uuid::Uuid;

use sg_shared::OffsetPage;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::domain::entities::principal::PrincipalContext;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository};
use crate::services::admin::{AdminService, MAX_PAGE_SIZE};

fn account(name: &str, role: Role, status: AccountStatus) -> Account {
    Account::new(name, format!("{}@example.com", name), "hash")
        .with_role(role)
        .with_status(status)
}

async fn setup() -> (InMemoryAccountRepository, AdminService, PrincipalContext) {
    let admin = account("root", Role::Admin, AccountStatus::Active);
    let principal = PrincipalContext::from(&admin);
    let repo = InMemoryAccountRepository::with_accounts(vec![
        admin,
        account("alice", Role::ReadOnly, AccountStatus::Pending),
        account("bob", Role::ReadWrite, AccountStatus::Active),
        account("carol", Role::ReadOnly, AccountStatus::Disabled),
    ]);
    let service = AdminService::new(Arc::new(repo.clone()));
    (repo, service, principal)
}

async fn find(repo: &InMemoryAccountRepository, name: &str) -> Account {
    repo.find_by_username(name).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_list_with_filters_and_pagination() {
    let (_, service, _) = setup().await;

    let all = service
        .list_accounts(None, None, OffsetPage::new(50, 0, MAX_PAGE_SIZE))
        .await
        .unwrap();
    assert_eq!(all.users.len(), 4);
    assert_eq!(all.pagination.total, 4);
    assert!(!all.pagination.has_more);

    let pending = service
        .list_accounts(Some(AccountStatus::Pending), None, OffsetPage::new(50, 0, MAX_PAGE_SIZE))
        .await
        .unwrap();
    assert_eq!(pending.users.len(), 1);
    assert_eq!(pending.users[0].username, "alice");

    let readers = service
        .list_accounts(None, Some(Role::ReadOnly), OffsetPage::new(1, 0, MAX_PAGE_SIZE))
        .await
        .unwrap();
    assert_eq!(readers.users.len(), 1);
    assert_eq!(readers.pagination.total, 2);
    assert!(readers.pagination.has_more);
}

#[tokio::test]
async fn test_listing_omits_password_hash() {
    let (_, service, _) = setup().await;

    let listing = service
        .list_accounts(None, None, OffsetPage::new(50, 0, MAX_PAGE_SIZE))
        .await
        .unwrap();
    let json = serde_json::to_string(&listing).unwrap();

    assert!(!json.contains("hash"));
    assert!(json.contains("\"hasMore\""));
}

#[tokio::test]
async fn test_organizations_are_active_non_admins() {
    let (repo, service, _) = setup().await;
    repo.create(account("acme_corp_eu", Role::ReadOnly, AccountStatus::Active))
        .await
        .unwrap();
    repo.create(account("ops", Role::Admin, AccountStatus::Active))
        .await
        .unwrap();

    let mut organizations = service.list_organizations().await.unwrap();
    organizations.sort_by(|a, b| a.username.cmp(&b.username));

    let names: Vec<_> = organizations.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["Acme corp eu", "Bob"]);
    assert_eq!(organizations[1].id, find(&repo, "bob").await.id);

    let json = serde_json::to_value(&organizations[0]).unwrap();
    assert_eq!(json["username"], "acme_corp_eu");
    assert!(json.get("role").is_none());
}

#[tokio::test]
async fn test_activate_pending_account() {
    let (repo, service, admin) = setup().await;
    let alice = find(&repo, "alice").await;

    let updated = service
        .update_status(&admin, alice.id, AccountStatus::Active)
        .await
        .unwrap();

    assert_eq!(updated.status, AccountStatus::Active);
    assert_eq!(find(&repo, "alice").await.status, AccountStatus::Active);
}

#[tokio::test]
async fn test_change_role() {
    let (repo, service, admin) = setup().await;
    let bob = find(&repo, "bob").await;

    let updated = service.update_role(&admin, bob.id, Role::Admin).await.unwrap();
    assert_eq!(updated.role, Role::Admin);
}

#[tokio::test]
async fn test_self_modification_is_rejected_and_record_unchanged() {
    let (repo, service, admin) = setup().await;

    let result = service
        .update_status(&admin, admin.id, AccountStatus::Disabled)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::SelfModification))
    ));

    let result = service.update_role(&admin, admin.id, Role::ReadOnly).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::SelfModification))
    ));

    let root = find(&repo, "root").await;
    assert_eq!(root.status, AccountStatus::Active);
    assert_eq!(root.role, Role::Admin);
}

#[tokio::test]
async fn test_unknown_target() {
    let (_, service, admin) = setup().await;

    let result = service
        .update_status(&admin, Uuid::new_v4(), AccountStatus::Active)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
