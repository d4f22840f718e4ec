//! Request and response bodies

pub mod admin;
pub mod auth;
pub mod files;
