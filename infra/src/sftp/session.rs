use async_trait::async_trait;
use chrono::{DateTime, Utc};
use russh::client::Handle;
use russh::Disconnect;
use russh_sftp::client::SftpSession;
use russh_sftp::protocol::StatusCode;

use sg_core::domain::entities::remote::{EntryKind, RemoteEntry};
use sg_core::errors::RemoteError;
use sg_core::services::session::{RemoteReader, RemoteSession, RemoteWriter};

use super::connector::HostKeyCheck;
use super::errors::{from_sftp, from_ssh};

/// One authenticated SSH connection running the `sftp` subsystem
///
/// Dropping the session drops the connection handle, which ends the
/// underlying SSH connection without a disconnect message.
pub struct SftpRemoteSession {
    handle: Option<Handle<HostKeyCheck>>,
    sftp: SftpSession,
}

impl SftpRemoteSession {
    pub(crate) fn new(handle: Handle<HostKeyCheck>, sftp: SftpSession) -> Self {
        Self {
            handle: Some(handle),
            sftp,
        }
    }
}

#[async_trait]
impl RemoteSession for SftpRemoteSession {
    async fn list(&mut self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        let dir = self
            .sftp
            .read_dir(path)
            .await
            .map_err(|e| from_sftp(e, path))?;

        Ok(dir
            .map(|entry| {
                let file_type = entry.file_type();
                let kind = if file_type.is_dir() {
                    EntryKind::Directory
                } else if file_type.is_symlink() {
                    EntryKind::Symlink
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                let metadata = entry.metadata();

                RemoteEntry {
                    name: entry.file_name(),
                    kind,
                    size: metadata.size.unwrap_or(0),
                    modified_at: metadata
                        .mtime
                        .and_then(|secs| DateTime::<Utc>::from_timestamp(i64::from(secs), 0)),
                    permissions: metadata.permissions,
                }
            })
            .collect())
    }

    async fn mkdir(&mut self, path: &str) -> Result<(), RemoteError> {
        let error = match self.sftp.create_dir(path).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        // SFTP v3 reports an existing target as a generic failure
        let generic_failure = matches!(
            &error,
            russh_sftp::client::error::Error::Status(status)
                if matches!(status.status_code, StatusCode::Failure)
        );
        if generic_failure && self.sftp.metadata(path).await.is_ok() {
            return Err(RemoteError::AlreadyExists(path.to_string()));
        }
        Err(from_sftp(error, path))
    }

    async fn open_read(&mut self, path: &str) -> Result<(RemoteReader, Option<u64>), RemoteError> {
        let size = self
            .sftp
            .metadata(path)
            .await
            .map_err(|e| from_sftp(e, path))?
            .size;
        let file = self.sftp.open(path).await.map_err(|e| from_sftp(e, path))?;
        Ok((Box::new(file), size))
    }

    async fn open_write(&mut self, path: &str) -> Result<RemoteWriter, RemoteError> {
        let file = self
            .sftp
            .create(path)
            .await
            .map_err(|e| from_sftp(e, path))?;
        Ok(Box::new(file))
    }

    async fn remove_file(&mut self, path: &str) -> Result<(), RemoteError> {
        self.sftp
            .remove_file(path)
            .await
            .map_err(|e| from_sftp(e, path))
    }

    async fn close(&mut self) -> Result<(), RemoteError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        if let Err(e) = self.sftp.close().await {
            tracing::debug!(error = %e, "SFTP subsystem close failed");
        }
        handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
            .map_err(from_ssh)
    }
}
