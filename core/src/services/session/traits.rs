use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::domain::entities::remote::RemoteEntry;
use crate::errors::RemoteError;

pub type RemoteReader = Box<dyn AsyncRead + Send + Unpin>;
pub type RemoteWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Opens new sessions against the remote store
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Connects and authenticates a fresh session. Never returns a pooled one.
    async fn connect(&self) -> Result<Box<dyn RemoteSession>, RemoteError>;
}

/// A connected session, exclusively owned by one broker attempt
///
/// Dropping a session must release its connection, since an abandoned
/// request drops it without calling `close`.
#[async_trait]
pub trait RemoteSession: Send {
    async fn list(&mut self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError>;

    async fn mkdir(&mut self, path: &str) -> Result<(), RemoteError>;

    /// Opens a file for reading, returning the reader and its size if known
    async fn open_read(&mut self, path: &str) -> Result<(RemoteReader, Option<u64>), RemoteError>;

    /// Creates or truncates a file for writing
    async fn open_write(&mut self, path: &str) -> Result<RemoteWriter, RemoteError>;

    async fn remove_file(&mut self, path: &str) -> Result<(), RemoteError>;

    async fn close(&mut self) -> Result<(), RemoteError>;
}

/// Work performed on a brokered session
///
/// `run` may be invoked once per attempt, each time on a new session.
/// Operations that consume a one-shot input must fail with a semantic error
/// once that input has been partially read.
#[async_trait(?Send)]
pub trait SessionOperation {
    type Output;

    async fn run(&mut self, session: &mut dyn RemoteSession) -> Result<Self::Output, RemoteError>;
}
