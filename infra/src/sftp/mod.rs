//! SFTP transport for the session broker
//!
//! Every `connect` opens a dedicated SSH connection, authenticates with the
//! configured password and starts the `sftp` subsystem on a new channel.

pub mod connector;
pub mod errors;
pub mod session;

pub use connector::SftpConnector;
pub use session::SftpRemoteSession;
