//! Route handlers grouped by area
//!
//! Each area exposes a `configure` function registering its scope.

pub mod admin;
pub mod auth;
pub mod files;
pub mod health;
