use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client;
use russh_keys::key::PublicKey;
use russh_sftp::client::SftpSession;

use sg_core::errors::RemoteError;
use sg_core::services::session::{RemoteSession, SessionConnector};
use sg_shared::config::SftpConfig;

use super::errors::{from_sftp, from_ssh};
use super::session::SftpRemoteSession;

/// Verifies the server host key against the configured fingerprint
pub struct HostKeyCheck {
    expected: Option<String>,
}

#[async_trait]
impl client::Handler for HostKeyCheck {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        let fingerprint = server_public_key.fingerprint();
        match &self.expected {
            None => {
                tracing::debug!(%fingerprint, "Accepting server host key");
                Ok(true)
            }
            Some(expected) if expected.trim_start_matches("SHA256:") == fingerprint => Ok(true),
            Some(_) => {
                tracing::error!(%fingerprint, "Server host key does not match the configured fingerprint");
                Ok(false)
            }
        }
    }
}

/// Opens a fresh SFTP session for every broker attempt
pub struct SftpConnector {
    config: SftpConfig,
    ssh: Arc<client::Config>,
}

impl SftpConnector {
    pub fn new(config: SftpConfig) -> Self {
        let ssh = client::Config {
            inactivity_timeout: Some(Duration::from_secs(300)),
            ..Default::default()
        };
        Self {
            config,
            ssh: Arc::new(ssh),
        }
    }

    async fn open(&self) -> Result<SftpRemoteSession, RemoteError> {
        let handler = HostKeyCheck {
            expected: self.config.host_key_fingerprint.clone(),
        };
        let mut handle = client::connect(
            self.ssh.clone(),
            (self.config.host.as_str(), self.config.port),
            handler,
        )
        .await
        .map_err(from_ssh)?;

        let authenticated = handle
            .authenticate_password(self.config.username.as_str(), self.config.password.as_str())
            .await
            .map_err(from_ssh)?;
        if !authenticated {
            tracing::error!(username = %self.config.username, "SFTP server rejected credentials");
            return Err(RemoteError::AuthenticationRejected);
        }

        let channel = handle.channel_open_session().await.map_err(from_ssh)?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(from_ssh)?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| from_sftp(e, "/"))?;

        Ok(SftpRemoteSession::new(handle, sftp))
    }
}

#[async_trait]
impl SessionConnector for SftpConnector {
    async fn connect(&self) -> Result<Box<dyn RemoteSession>, RemoteError> {
        let session = tokio::time::timeout(self.config.connect_timeout(), self.open())
            .await
            .map_err(|_| RemoteError::Timeout)??;

        tracing::debug!(host = %self.config.host, port = self.config.port, "SFTP session opened");
        Ok(Box::new(session))
    }
}
