//! Domain entities representing core business objects.

pub mod account;
pub mod principal;
pub mod remote;
pub mod token;


// Re-export commonly used types
pub use account::{Account, AccountStatus, PublicAccount, Role};
pub use principal::PrincipalContext;
pub use remote::{DownloadMeta, EntryKind, RemoteEntry, UploadReceipt};
pub use token::{
    AccessGrant, TokenClaims, TokenPair, TokenSubject, TokenType, ACCESS_TOKEN_TTL_SECONDS,
    REFRESH_TOKEN_TTL_SECONDS,
};
