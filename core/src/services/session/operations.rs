use std::fmt::Display;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};

use crate::domain::entities::remote::{DownloadMeta, RemoteEntry, UploadReceipt};
use crate::errors::RemoteError;

use super::traits::{RemoteSession, SessionOperation};

/// Read buffer size for downloads
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// Lists a directory
#[derive(Debug, Clone)]
pub struct ListDirectory {
    pub path: String,
}

impl ListDirectory {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl SessionOperation for ListDirectory {
    type Output = Vec<RemoteEntry>;

    async fn run(&mut self, session: &mut dyn RemoteSession) -> Result<Self::Output, RemoteError> {
        let mut entries = session.list(&self.path).await?;
        entries.retain(|e| e.name != "." && e.name != "..");
        entries.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(entries)
    }
}

/// Creates a single directory
#[derive(Debug, Clone)]
pub struct MakeDirectory {
    pub path: String,
}

impl MakeDirectory {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl SessionOperation for MakeDirectory {
    type Output = ();

    async fn run(&mut self, session: &mut dyn RemoteSession) -> Result<(), RemoteError> {
        session.mkdir(&self.path).await
    }
}

/// Streams a byte source into a remote file, enforcing a size limit.
///
/// The source can only be read once: a failure after the first chunk has
/// been pulled is reported as `TransferAborted`, never retried.
pub struct UploadFile<S> {
    path: String,
    filename: String,
    source: S,
    limit: u64,
    started: bool,
}

impl<S, E> UploadFile<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    pub fn new(path: impl Into<String>, filename: impl Into<String>, source: S, limit: u64) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            source,
            limit,
            started: false,
        }
    }

    async fn copy(&mut self, session: &mut dyn RemoteSession) -> Result<u64, RemoteError> {
        let mut writer = session.open_write(&self.path).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = self.source.next().await {
            self.started = true;
            let chunk = chunk.map_err(|e| RemoteError::TransferAborted(e.to_string()))?;

            written += chunk.len() as u64;
            if written > self.limit {
                return Err(RemoteError::PayloadTooLarge { limit: self.limit });
            }

            writer
                .write_all(&chunk)
                .await
                .map_err(|e| RemoteError::TransferAborted(e.to_string()))?;
        }

        writer
            .shutdown()
            .await
            .map_err(|e| RemoteError::TransferAborted(e.to_string()))?;
        Ok(written)
    }
}

#[async_trait(?Send)]
impl<S, E> SessionOperation for UploadFile<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    type Output = UploadReceipt;

    async fn run(&mut self, session: &mut dyn RemoteSession) -> Result<UploadReceipt, RemoteError> {
        if self.started {
            return Err(RemoteError::TransferAborted(
                "upload source already partially consumed".to_string(),
            ));
        }

        match self.copy(&mut *session).await {
            Ok(size) => Ok(UploadReceipt {
                path: self.path.clone(),
                filename: self.filename.clone(),
                size,
            }),
            Err(error) => {
                if self.started {
                    // Don't leave a truncated file behind
                    if let Err(e) = session.remove_file(&self.path).await {
                        tracing::warn!(path = %self.path, error = %e, "Failed to remove partial upload");
                    }
                }
                Err(error)
            }
        }
    }
}

/// Streams a remote file into a bounded channel.
///
/// Sends the file's metadata on `ready` once the file is open and before any
/// chunk, so the caller can commit response headers only for files that
/// exist. Returns the number of bytes sent.
pub struct DownloadFile {
    path: String,
    ready: Option<oneshot::Sender<DownloadMeta>>,
    sink: mpsc::Sender<Result<Bytes, RemoteError>>,
    chunk_size: usize,
}

impl DownloadFile {
    pub fn new(
        path: impl Into<String>,
        ready: oneshot::Sender<DownloadMeta>,
        sink: mpsc::Sender<Result<Bytes, RemoteError>>,
    ) -> Self {
        Self {
            path: path.into(),
            ready: Some(ready),
            sink,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

#[async_trait(?Send)]
impl SessionOperation for DownloadFile {
    type Output = u64;

    async fn run(&mut self, session: &mut dyn RemoteSession) -> Result<u64, RemoteError> {
        if self.ready.is_none() {
            return Err(RemoteError::TransferAborted(
                "download already started streaming".to_string(),
            ));
        }

        let (mut reader, size) = session.open_read(&self.path).await?;

        if let Some(ready) = self.ready.take() {
            let meta = DownloadMeta {
                path: self.path.clone(),
                size,
            };
            if ready.send(meta).is_err() {
                return Err(RemoteError::Cancelled);
            }
        }

        let mut buf = vec![0u8; self.chunk_size];
        let mut sent: u64 = 0;
        loop {
            let n = reader
                .read(&mut buf)
                .await
                .map_err(|e| RemoteError::TransferAborted(e.to_string()))?;
            if n == 0 {
                break;
            }

            // Receiver gone means the client went away
            if self
                .sink
                .send(Ok(Bytes::copy_from_slice(&buf[..n])))
                .await
                .is_err()
            {
                return Err(RemoteError::Cancelled);
            }
            sent += n as u64;
        }

        Ok(sent)
    }
}
