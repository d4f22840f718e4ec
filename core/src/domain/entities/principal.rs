//! The resolved identity attached to an authorized request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, AccountStatus, Role};

/// Identity of the caller, built from a fresh account read on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalContext {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub email: String,
    pub status: AccountStatus,
}

impl PrincipalContext {
    /// Whether the principal holds one of `roles`; an empty set admits everyone
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.is_empty() || roles.contains(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&Account> for PrincipalContext {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            role: account.role,
            email: account.email.clone(),
            status: account.status,
        }
    }
}
