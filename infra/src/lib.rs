//! # Infrastructure Layer
//!
//! Concrete implementations of the core's outbound ports:
//!
//! - **Database**: PostgreSQL account repository using SQLx
//! - **SFTP**: `SessionConnector` over russh + russh-sftp, including the
//!   classification of transport failures into transient and semantic
//!   remote errors

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// SFTP transport for the session broker
pub mod sftp;

pub use database::{DatabasePool, PgAccountRepository, PoolStatistics};
pub use sftp::SftpConnector;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
