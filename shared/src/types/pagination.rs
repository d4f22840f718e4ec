//! Offset pagination for list endpoints

use serde::{Deserialize, Serialize};

/// Limit/offset window applied to a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPage {
    pub limit: u32,
    pub offset: u32,
}

impl OffsetPage {
    /// Create a window, clamping `limit` into `1..=max_limit`
    pub fn new(limit: u32, offset: u32, max_limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, max_limit.max(1)),
            offset,
        }
    }

    /// Apply the window to an in-memory collection
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }

    /// Build the page metadata for a result of `returned` items out of `total`
    pub fn info(&self, returned: usize, total: u64) -> PageInfo {
        PageInfo {
            total,
            limit: self.limit,
            offset: self.offset,
            has_more: (self.offset as u64 + returned as u64) < total,
        }
    }
}

/// Pagination metadata returned alongside list results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub has_more: bool,
}
