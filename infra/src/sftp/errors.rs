//! Classification of SSH and SFTP failures into remote errors
//!
//! Only failures that say nothing about the requested path are transient:
//! refused or dropped connections and timeouts. Everything the server
//! answered deliberately (missing file, permission, rejected login) is
//! semantic and must not be retried.

use std::io;

use russh_sftp::client::error::Error as SftpError;
use russh_sftp::protocol::StatusCode;

use sg_core::errors::RemoteError;

/// Maps an SSH transport error raised while connecting or operating
pub fn from_ssh(error: russh::Error) -> RemoteError {
    match error {
        russh::Error::IO(e) => from_io(&e),
        russh::Error::ConnectionTimeout => RemoteError::Timeout,
        russh::Error::Disconnect | russh::Error::HUP => {
            RemoteError::ConnectionLost("server closed the connection".to_string())
        }
        russh::Error::UnknownKey => RemoteError::AuthenticationRejected,
        other => RemoteError::Protocol(other.to_string()),
    }
}

pub fn from_io(error: &io::Error) -> RemoteError {
    match error.kind() {
        io::ErrorKind::ConnectionRefused => RemoteError::ConnectionRefused(error.to_string()),
        io::ErrorKind::TimedOut => RemoteError::Timeout,
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::NotConnected
        | io::ErrorKind::UnexpectedEof => RemoteError::ConnectionLost(error.to_string()),
        // Name resolution, permissions and bad input won't improve on retry
        _ => RemoteError::Protocol(error.to_string()),
    }
}

/// Maps an SFTP client error for an operation on `path`
pub fn from_sftp(error: SftpError, path: &str) -> RemoteError {
    match error {
        SftpError::Status(status) => from_status(status.status_code, &status.error_message, path),
        SftpError::Timeout => RemoteError::Timeout,
        SftpError::IO(message) => RemoteError::ConnectionLost(message),
        other => RemoteError::Protocol(other.to_string()),
    }
}

pub fn from_status(code: StatusCode, message: &str, path: &str) -> RemoteError {
    match code {
        StatusCode::NoSuchFile => RemoteError::NotFound(path.to_string()),
        StatusCode::PermissionDenied => RemoteError::PermissionDenied(path.to_string()),
        StatusCode::NoConnection | StatusCode::ConnectionLost => {
            RemoteError::ConnectionLost(message.to_string())
        }
        _ => RemoteError::Protocol(format!("{:?}: {}", code, message)),
    }
}
