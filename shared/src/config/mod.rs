//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Token signing and lifetimes
//! - `database` - Account database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `remote` - SFTP endpoint and session broker policy
//! - `sandbox` - Path sandbox root and upload limits
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod remote;
pub mod sandbox;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use remote::{BrokerConfig, RemoteConfig, SftpConfig};
pub use sandbox::SandboxConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
///
/// Constructed once at startup and handed by reference to the services that
/// need it, so tests can build isolated instances with their own secrets and
/// hosts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Remote store and broker configuration
    pub remote: RemoteConfig,

    /// Sandbox configuration
    #[serde(default)]
    pub sandbox: SandboxConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            remote: RemoteConfig::default(),
            sandbox: SandboxConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            remote: RemoteConfig::from_env(),
            sandbox: SandboxConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

/// Reads an environment variable and parses it, falling back to `default`
/// when the variable is absent or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
