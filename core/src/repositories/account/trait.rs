//! Account repository trait defining the interface for account persistence.
//!
//! The authorization gate reads through this trait on every request, so
//! implementations must return the current state of the record and never a
//! cached copy.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::errors::DomainError;

/// Filter and window for account listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub status: Option<AccountStatus>,
    pub role: Option<Role>,
    pub limit: u32,
    pub offset: u32,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        self.status.map_or(true, |s| account.status == s)
            && self.role.map_or(true, |r| account.role == r)
    }
}

/// Repository trait for Account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given id
    /// * `Err(DomainError)` - Store failure
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// Fails with `AuthError::UsernameTaken` when the username is in use.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Set an account's status, returning the updated record or `None` if absent
    async fn update_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<Option<Account>, DomainError>;

    /// Set an account's role, returning the updated record or `None` if absent
    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Account>, DomainError>;

    /// List accounts matching the filter, newest first, windowed by limit/offset
    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, DomainError>;

    /// Count accounts matching the filter, ignoring limit/offset
    async fn count(&self, filter: &AccountFilter) -> Result<u64, DomainError>;
}
