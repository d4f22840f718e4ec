//! Session broker for the remote file store
//!
//! Every logical file operation runs on its own freshly connected session,
//! which is torn down before the operation's result is returned. Transient
//! failures are retried on a new session; semantic failures are not.

mod broker;
mod config;
mod memory;
mod operations;
mod traits;

#[cfg(test)]
mod tests;

pub use broker::SessionBroker;
pub use config::SessionBrokerConfig;
pub use memory::MemoryConnector;
pub use operations::{DownloadFile, ListDirectory, MakeDirectory, UploadFile, DEFAULT_CHUNK_SIZE};
pub use traits::{RemoteReader, RemoteSession, RemoteWriter, SessionConnector, SessionOperation};
