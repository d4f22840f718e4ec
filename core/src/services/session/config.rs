use std::time::Duration;

use sg_shared::BrokerConfig;

/// Retry and concurrency policy for the session broker
#[derive(Debug, Clone)]
pub struct SessionBrokerConfig {
    /// Attempts per operation, including the first
    pub max_retries: u32,
    pub max_concurrent_sessions: usize,
    /// Deadline covering connect and operation of a single attempt
    pub attempt_timeout: Option<Duration>,
    pub retry_backoff: Option<Duration>,
}

impl Default for SessionBrokerConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            max_concurrent_sessions: 16,
            attempt_timeout: None,
            retry_backoff: None,
        }
    }
}

impl From<&BrokerConfig> for SessionBrokerConfig {
    fn from(config: &BrokerConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            max_concurrent_sessions: config.max_concurrent_sessions,
            attempt_timeout: config.attempt_timeout(),
            retry_backoff: config.retry_backoff(),
        }
    }
}
