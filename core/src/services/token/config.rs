//! Configuration for the token service

use sg_shared::JwtConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Value of the `iss` claim, required on verification
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_ttl: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            issuer: "sftp-gateway".to_string(),
            access_token_ttl: ACCESS_TOKEN_TTL_SECONDS,
            refresh_token_ttl: REFRESH_TOKEN_TTL_SECONDS,
        }
    }
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            access_token_ttl: jwt.access_token_expiry,
            refresh_token_ttl: jwt.refresh_token_expiry,
        }
    }
}
