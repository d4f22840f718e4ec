pub mod auth;
pub mod request_id;
pub mod security;

pub use auth::{Principal, RequireAuth, ADMINS, READERS, WRITERS};
pub use request_id::{RequestId, RequestIdMiddleware, REQUEST_ID_HEADER};
pub use security::SecurityHeaders;
