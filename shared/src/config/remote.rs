//! Remote file store configuration
//!
//! Covers the SFTP endpoint credentials and the policy the session broker
//! applies to every remote operation (retries, timeouts, concurrency).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// SFTP endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SftpConfig {
    /// Remote host name or address
    pub host: String,

    /// Remote SSH port
    pub port: u16,

    /// Login user
    pub username: String,

    /// Login password
    #[serde(skip_serializing)]
    pub password: String,

    /// TCP connect + handshake timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Expected SHA-256 fingerprint of the server host key; any key is
    /// accepted when unset
    #[serde(default)]
    pub host_key_fingerprint: Option<String>,
}

impl Default for SftpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 2222,
            username: String::from("sftpuser"),
            password: String::from("password"),
            connect_timeout: default_connect_timeout(),
            host_key_fingerprint: None,
        }
    }
}

impl SftpConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SFTP_HOST").unwrap_or(defaults.host),
            port: env_or("SFTP_PORT", defaults.port),
            username: std::env::var("SFTP_USER").unwrap_or(defaults.username),
            password: std::env::var("SFTP_PASSWORD").unwrap_or(defaults.password),
            connect_timeout: env_or("SFTP_CONNECT_TIMEOUT", defaults.connect_timeout),
            host_key_fingerprint: std::env::var("SFTP_HOST_FINGERPRINT")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

/// Session broker policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrokerConfig {
    /// Maximum attempts per logical operation (at least 1)
    pub max_retries: u32,

    /// Upper bound on simultaneously open remote sessions
    pub max_concurrent_sessions: usize,

    /// Per-attempt deadline in seconds; `None` waits indefinitely
    #[serde(default)]
    pub attempt_timeout: Option<u64>,

    /// Pause between attempts in milliseconds; `None` retries immediately
    #[serde(default)]
    pub retry_backoff_ms: Option<u64>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            max_concurrent_sessions: 16,
            attempt_timeout: None,
            retry_backoff_ms: None,
        }
    }
}

impl BrokerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_or("MAX_RETRIES", defaults.max_retries).max(1),
            max_concurrent_sessions: env_or(
                "MAX_CONCURRENT_SESSIONS",
                defaults.max_concurrent_sessions,
            )
            .max(1),
            attempt_timeout: std::env::var("SFTP_ATTEMPT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok()),
            retry_backoff_ms: std::env::var("SFTP_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout.map(Duration::from_secs)
    }

    pub fn retry_backoff(&self) -> Option<Duration> {
        self.retry_backoff_ms.map(Duration::from_millis)
    }
}

/// Remote store configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    pub sftp: SftpConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
}

impl RemoteConfig {
    pub fn from_env() -> Self {
        Self {
            sftp: SftpConfig::from_env(),
            broker: BrokerConfig::from_env(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}
