use serde::{Deserialize, Serialize};
use validator::Validate;

use sg_core::domain::entities::remote::RemoteEntry;
use sg_shared::PageInfo;

pub const DEFAULT_LIST_LIMIT: u32 = 100;
pub const MAX_LIST_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(length(max = 500))]
    pub path: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DownloadQuery {
    #[validate(length(min = 1, max = 500))]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadQuery {
    #[validate(length(max = 500))]
    pub path: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MkdirRequest {
    #[validate(length(min = 1, max = 500))]
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub path: String,
    pub files: Vec<RemoteEntry>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub path: String,
}
