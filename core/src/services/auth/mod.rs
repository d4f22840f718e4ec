//! Authentication service module
//!
//! Password login, self-registration and access-token refresh. Newly
//! registered accounts start out pending and read-only until an
//! administrator activates them.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, validate_password, validate_username, verify_password};
pub use service::AuthService;
