//! In-memory remote store implementing `SessionConnector`
//!
//! Used by tests and local runs without an SFTP server. Supports injecting
//! connect and operation failures and reports session bookkeeping so callers
//! can assert on teardown and concurrency.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::domain::entities::remote::{EntryKind, RemoteEntry};
use crate::errors::RemoteError;

use super::traits::{RemoteReader, RemoteSession, RemoteWriter, SessionConnector};

#[derive(Debug, Default)]
struct State {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
    connect_failures: VecDeque<RemoteError>,
    operation_failures: VecDeque<RemoteError>,
    read_failure_after: Option<usize>,
    connects: usize,
    closes: usize,
    open: usize,
    peak_open: usize,
}

type Shared = Arc<Mutex<State>>;

fn lock(state: &Shared) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A remote store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    state: Shared,
    latency: Option<Duration>,
}

impl MemoryConnector {
    /// Creates a store containing only `/`
    pub fn new() -> Self {
        let connector = Self::default();
        lock(&connector.state).dirs.insert("/".to_string());
        connector
    }

    /// Creates a store with `root` and all its ancestors present
    pub fn with_root(root: &str) -> Self {
        let connector = Self::new();
        connector.add_dir(root);
        connector
    }

    /// Delays every connect and operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Adds a directory and its ancestors
    pub fn add_dir(&self, path: &str) {
        let mut state = lock(&self.state);
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(segment);
            state.dirs.insert(current.clone());
        }
    }

    /// Adds a file, creating its parent directories
    pub fn add_file(&self, path: &str, contents: impl Into<Vec<u8>>) {
        self.add_dir(parent_of(path));
        lock(&self.state)
            .files
            .insert(path.to_string(), contents.into());
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        lock(&self.state).files.get(path).cloned()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        lock(&self.state).dirs.contains(path)
    }

    /// Makes the next connects fail with the given errors, in order
    pub fn fail_connects(&self, errors: impl IntoIterator<Item = RemoteError>) {
        lock(&self.state).connect_failures.extend(errors);
    }

    /// Makes the next session operations fail with the given errors, in order
    pub fn fail_operations(&self, errors: impl IntoIterator<Item = RemoteError>) {
        lock(&self.state).operation_failures.extend(errors);
    }

    /// Makes readers opened from now on fail after yielding `bytes` bytes
    pub fn fail_reads_after(&self, bytes: usize) {
        lock(&self.state).read_failure_after = Some(bytes);
    }

    /// Successful connects so far
    pub fn connects(&self) -> usize {
        lock(&self.state).connects
    }

    /// Sessions closed explicitly so far
    pub fn closes(&self) -> usize {
        lock(&self.state).closes
    }

    /// Sessions currently open
    pub fn open_sessions(&self) -> usize {
        lock(&self.state).open
    }

    /// Highest number of sessions that were open at once
    pub fn peak_open_sessions(&self) -> usize {
        lock(&self.state).peak_open
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl SessionConnector for MemoryConnector {
    async fn connect(&self) -> Result<Box<dyn RemoteSession>, RemoteError> {
        self.delay().await;

        let mut state = lock(&self.state);
        if let Some(error) = state.connect_failures.pop_front() {
            return Err(error);
        }
        state.connects += 1;
        state.open += 1;
        state.peak_open = state.peak_open.max(state.open);
        drop(state);

        Ok(Box::new(MemorySession {
            connector: self.clone(),
            closed: false,
        }))
    }
}

struct MemorySession {
    connector: MemoryConnector,
    closed: bool,
}

impl MemorySession {
    async fn begin(&self) -> Result<MutexGuard<'_, State>, RemoteError> {
        self.connector.delay().await;
        if self.closed {
            return Err(RemoteError::ConnectionLost("session closed".to_string()));
        }
        let mut state = lock(&self.connector.state);
        match state.operation_failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            let mut state = lock(&self.connector.state);
            state.open = state.open.saturating_sub(1);
        }
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.release();
    }
}

#[async_trait]
impl RemoteSession for MemorySession {
    async fn list(&mut self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        let state = self.begin().await?;
        if !state.dirs.contains(path) {
            return Err(RemoteError::NotFound(path.to_string()));
        }

        let dirs = state
            .dirs
            .iter()
            .filter(|d| d.as_str() != "/" && parent_of(d) == path)
            .map(|d| RemoteEntry {
                name: name_of(d).to_string(),
                kind: EntryKind::Directory,
                size: 0,
                modified_at: Some(Utc::now()),
                permissions: Some(0o755),
            });
        let files = state
            .files
            .iter()
            .filter(|(f, _)| parent_of(f) == path)
            .map(|(f, contents)| RemoteEntry {
                name: name_of(f).to_string(),
                kind: EntryKind::File,
                size: contents.len() as u64,
                modified_at: Some(Utc::now()),
                permissions: Some(0o644),
            });

        Ok(dirs.chain(files).collect())
    }

    async fn mkdir(&mut self, path: &str) -> Result<(), RemoteError> {
        let mut state = self.begin().await?;
        if state.dirs.contains(path) || state.files.contains_key(path) {
            return Err(RemoteError::AlreadyExists(path.to_string()));
        }
        if !state.dirs.contains(parent_of(path)) {
            return Err(RemoteError::NotFound(parent_of(path).to_string()));
        }
        state.dirs.insert(path.to_string());
        Ok(())
    }

    async fn open_read(&mut self, path: &str) -> Result<(RemoteReader, Option<u64>), RemoteError> {
        let state = self.begin().await?;
        let contents = state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))?;
        let size = contents.len() as u64;
        let reader = MemoryReader {
            contents,
            position: 0,
            fail_after: state.read_failure_after,
        };
        Ok((Box::new(reader), Some(size)))
    }

    async fn open_write(&mut self, path: &str) -> Result<RemoteWriter, RemoteError> {
        let mut state = self.begin().await?;
        if !state.dirs.contains(parent_of(path)) {
            return Err(RemoteError::NotFound(parent_of(path).to_string()));
        }
        if state.dirs.contains(path) {
            return Err(RemoteError::AlreadyExists(path.to_string()));
        }
        state.files.insert(path.to_string(), Vec::new());
        Ok(Box::new(MemoryWriter {
            state: self.connector.state.clone(),
            path: path.to_string(),
        }))
    }

    async fn remove_file(&mut self, path: &str) -> Result<(), RemoteError> {
        let mut state = self.begin().await?;
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))
    }

    async fn close(&mut self) -> Result<(), RemoteError> {
        if !self.closed {
            lock(&self.connector.state).closes += 1;
        }
        self.release();
        Ok(())
    }
}

struct MemoryReader {
    contents: Vec<u8>,
    position: usize,
    fail_after: Option<usize>,
}

impl AsyncRead for MemoryReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let limit = match self.fail_after {
            Some(limit) if self.position >= limit => {
                return Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset during read",
                )));
            }
            Some(limit) => limit.min(self.contents.len()),
            None => self.contents.len(),
        };

        let start = self.position;
        let n = (limit - start).min(buf.remaining());
        buf.put_slice(&self.contents[start..start + n]);
        self.position += n;
        Poll::Ready(Ok(()))
    }
}

struct MemoryWriter {
    state: Shared,
    path: String,
}

impl AsyncWrite for MemoryWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let mut state = lock(&self.state);
        match state.files.get_mut(&self.path) {
            Some(file) => {
                file.extend_from_slice(buf);
                Poll::Ready(Ok(buf.len()))
            }
            None => Poll::Ready(Err(io::Error::new(
                io::ErrorKind::NotFound,
                "file removed during write",
            ))),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
