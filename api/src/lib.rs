//! HTTP surface of the SFTP Gateway
//!
//! Exposes the application factory so the binary and the integration tests
//! build the same service tree.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{configure, create_app, AppState};
