use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::errors::RemoteError;

use super::config::SessionBrokerConfig;
use super::traits::{RemoteSession, SessionConnector, SessionOperation};

/// Runs operations on single-use remote sessions
pub struct SessionBroker {
    connector: Arc<dyn SessionConnector>,
    config: SessionBrokerConfig,
    permits: Arc<Semaphore>,
}

impl SessionBroker {
    pub fn new(connector: Arc<dyn SessionConnector>, config: SessionBrokerConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_sessions.max(1)));
        Self {
            connector,
            config,
            permits,
        }
    }

    /// Number of sessions that could be opened right now without waiting
    pub fn available_sessions(&self) -> usize {
        self.permits.available_permits()
    }

    /// Runs `operation` on a fresh session, retrying transient failures
    pub async fn with_session<O>(&self, operation: &mut O) -> Result<O::Output, RemoteError>
    where
        O: SessionOperation,
    {
        self.with_session_until(operation, &CancellationToken::new())
            .await
    }

    /// Like [`with_session`](Self::with_session), but gives up with
    /// `Cancelled` as soon as `cancel` fires, closing any open session.
    pub async fn with_session_until<O>(
        &self,
        operation: &mut O,
        cancel: &CancellationToken,
    ) -> Result<O::Output, RemoteError>
    where
        O: SessionOperation,
    {
        // Held across every attempt of this call
        let _permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RemoteError::Cancelled),
            permit = self.permits.acquire() => permit.map_err(|_| RemoteError::Cancelled)?,
        };

        let max_attempts = self.config.max_retries.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;

            let error = match self.attempt(operation, cancel).await {
                Ok(output) => return Ok(output),
                Err(error) => error,
            };

            if !error.is_transient() {
                tracing::debug!(attempt, error = %error, "Remote operation failed");
                return Err(error);
            }
            if attempt >= max_attempts {
                tracing::error!(
                    attempts = attempt,
                    error = %error,
                    "Remote operation failed after exhausting retries"
                );
                return Err(error);
            }

            tracing::warn!(
                attempt,
                max_attempts,
                error = %error,
                "Transient remote failure, retrying on a new session"
            );

            if let Some(backoff) = self.config.retry_backoff {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(RemoteError::Cancelled),
                    _ = tokio::time::sleep(backoff) => {}
                }
            }
        }
    }

    async fn attempt<O>(
        &self,
        operation: &mut O,
        cancel: &CancellationToken,
    ) -> Result<O::Output, RemoteError>
    where
        O: SessionOperation,
    {
        let deadline = self.config.attempt_timeout.map(|t| Instant::now() + t);

        let mut session = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RemoteError::Cancelled),
            session = within(deadline, self.connector.connect()) => session?,
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RemoteError::Cancelled),
            result = within(deadline, operation.run(&mut *session)) => result,
        };

        close(&mut *session).await;
        result
    }
}

async fn within<T>(
    deadline: Option<Instant>,
    future: impl Future<Output = Result<T, RemoteError>>,
) -> Result<T, RemoteError> {
    match deadline {
        Some(deadline) => timeout_at(deadline, future)
            .await
            .map_err(|_| RemoteError::Timeout)?,
        None => future.await,
    }
}

async fn close(session: &mut dyn RemoteSession) {
    if let Err(e) = session.close().await {
        tracing::debug!(error = %e, "Error while closing remote session");
    }
}
