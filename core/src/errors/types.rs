//! Error types for authentication, tokens, validation, the path sandbox and
//! the remote file store.
//!
//! Variants are matched exhaustively by the presentation layer, which owns
//! the mapping to HTTP statuses and wire codes.

use thiserror::Error;

use crate::domain::entities::token::TokenType;

/// Authentication and authorization failures
///
/// The first six variants are the terminal states of the authorization gate,
/// in the order the gate evaluates them.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    TokenInvalid(#[source] TokenError),

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account pending approval")]
    AccountPending,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Cannot modify your own account")]
    SelfModification,
}

/// Token verification and signing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid signature")]
    SignatureInvalid,

    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Token signing failed")]
    SigningFailed,
}

/// Input validation failures
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Weak password: {reason}")]
    WeakPassword { reason: String },
}

/// Path containment failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SandboxError {
    #[error("Path escapes the sandbox root: {path}")]
    PathTraversal { path: String },

    #[error("Path contains illegal characters")]
    IllegalCharacter,
}

/// Failures reported by the remote file store
///
/// Transient variants are retried by the session broker; the rest fail fast.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Remote operation timed out")]
    Timeout,

    #[error("Remote authentication rejected")]
    AuthenticationRejected,

    #[error("Remote path not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Remote path already exists: {0}")]
    AlreadyExists(String),

    #[error("Payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("Transfer aborted: {0}")]
    TransferAborted(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RemoteError {
    /// Whether a fresh session might succeed where this one failed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RemoteError::ConnectionRefused(_) | RemoteError::ConnectionLost(_) | RemoteError::Timeout
        )
    }
}
