use serde::Deserialize;
use validator::Validate;

use sg_core::domain::entities::account::{AccountStatus, Role};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListUsersQuery {
    pub status: Option<AccountStatus>,
    pub role: Option<Role>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AccountStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
