//! Shared configuration and wire types for the SFTP Gateway server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelopes shared by every endpoint
//! - Offset pagination for list endpoints

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, BrokerConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    RemoteConfig, SandboxConfig, ServerConfig, SftpConfig,
};
pub use types::{ApiResponse, ErrorBody, OffsetPage, PageInfo, ResponseStatus};
