//! Type definitions module
//!
//! - `pagination` - Offset pagination for list endpoints
//! - `response` - Uniform success/error envelopes

pub mod pagination;
pub mod response;

pub use pagination::{OffsetPage, PageInfo};
pub use response::{ApiResponse, ErrorBody, ResponseStatus};
