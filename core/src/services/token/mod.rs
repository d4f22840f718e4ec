//! Token service module for JWT management
//!
//! Signs and verifies the gateway's access and refresh tokens. The service
//! holds no state beyond its keys and an injected clock, so it can be shared
//! freely across request handlers.

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenService;
