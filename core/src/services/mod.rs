//! Business services containing domain logic and use cases.

pub mod admin;
pub mod auth;
pub mod authorization;
pub mod sandbox;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use admin::{AccountListing, AdminService, Organization};
pub use auth::{AuthService, AuthServiceConfig};
pub use authorization::AuthorizationGate;
pub use sandbox::{sanitize_file_name, PathSandbox};
pub use session::{
    DownloadFile, ListDirectory, MakeDirectory, MemoryConnector, RemoteSession, SessionBroker,
    SessionBrokerConfig, SessionConnector, SessionOperation, UploadFile,
};
pub use token::{Clock, SystemClock, TokenService, TokenServiceConfig};
