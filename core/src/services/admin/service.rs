use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use sg_shared::{OffsetPage, PageInfo};

use crate::domain::entities::account::{Account, AccountStatus, PublicAccount, Role};
use crate::domain::entities::principal::PrincipalContext;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{AccountFilter, AccountRepository};

/// Largest page an account listing may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of accounts
#[derive(Debug, Clone, Serialize)]
pub struct AccountListing {
    pub users: Vec<PublicAccount>,
    pub pagination: PageInfo,
}

/// Active non-admin account presented as a selectable organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

impl From<&Account> for Organization {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: display_name(&account.username),
            username: account.username.clone(),
        }
    }
}

/// `acme_corp_eu` becomes `Acme corp eu`
fn display_name(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.map(|c| if c == '-' || c == '_' { ' ' } else { c }))
            .collect(),
        None => String::new(),
    }
}

/// Administrative operations on accounts
///
/// Callers are expected to have passed the authorization gate with the
/// admin role already; this service only guards against an administrator
/// changing their own record.
pub struct AdminService {
    accounts: Arc<dyn AccountRepository>,
}

impl AdminService {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn list_accounts(
        &self,
        status: Option<AccountStatus>,
        role: Option<Role>,
        page: OffsetPage,
    ) -> DomainResult<AccountListing> {
        let filter = AccountFilter {
            status,
            role,
            limit: page.limit,
            offset: page.offset,
        };

        let accounts = self.accounts.list(&filter).await?;
        let total = self.accounts.count(&filter).await?;

        Ok(AccountListing {
            pagination: page.info(accounts.len(), total),
            users: accounts.iter().map(Account::to_public).collect(),
        })
    }

    /// First page of active accounts, administrators excluded
    pub async fn list_organizations(&self) -> DomainResult<Vec<Organization>> {
        let filter = AccountFilter {
            status: Some(AccountStatus::Active),
            role: None,
            limit: MAX_PAGE_SIZE,
            offset: 0,
        };

        let accounts = self.accounts.list(&filter).await?;
        Ok(accounts
            .iter()
            .filter(|a| a.role != Role::Admin)
            .map(Organization::from)
            .collect())
    }

    pub async fn update_status(
        &self,
        caller: &PrincipalContext,
        target: Uuid,
        status: AccountStatus,
    ) -> DomainResult<Account> {
        let current = self.load_other(caller, target).await?;

        let updated = self
            .accounts
            .update_status(target, status)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            admin = %caller.username,
            target = %current.username,
            old_status = %current.status,
            new_status = %updated.status,
            "Account status changed"
        );
        Ok(updated)
    }

    pub async fn update_role(
        &self,
        caller: &PrincipalContext,
        target: Uuid,
        role: Role,
    ) -> DomainResult<Account> {
        let current = self.load_other(caller, target).await?;

        let updated = self
            .accounts
            .update_role(target, role)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            admin = %caller.username,
            target = %current.username,
            old_role = %current.role,
            new_role = %updated.role,
            "Account role changed"
        );
        Ok(updated)
    }

    async fn load_other(&self, caller: &PrincipalContext, target: Uuid) -> DomainResult<Account> {
        let account = self
            .accounts
            .find_by_id(target)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if account.id == caller.id {
            return Err(AuthError::SelfModification.into());
        }
        Ok(account)
    }
}
