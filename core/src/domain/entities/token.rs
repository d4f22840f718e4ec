//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Role;

/// Access token lifetime (15 minutes)
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;

/// Refresh token lifetime (7 days)
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Discriminates access tokens from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Identity a token is minted for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub username: String,
    pub account_id: Uuid,
    pub role: Role,
}

impl TokenSubject {
    pub fn new(username: impl Into<String>, account_id: Uuid, role: Role) -> Self {
        Self {
            username: username.into(),
            account_id,
            role,
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,

    /// Account identifier
    pub id: Uuid,

    /// Role at signing time; informational only, never trusted for authorization
    pub role: Role,

    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    /// The identity these claims were minted for
    pub fn subject(&self) -> TokenSubject {
        TokenSubject::new(self.sub.clone(), self.id, self.role)
    }

    /// Whether the claims are expired at the given unix timestamp
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Access/refresh token pair returned on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
            token_type: String::from("Bearer"),
        }
    }
}

/// New access token issued from a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    pub access_token: String,
    pub expires_in: i64,
}
