//! Main token service implementation

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{TokenClaims, TokenPair, TokenSubject, TokenType};
use crate::errors::TokenError;

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Service for signing and verifying JWT access and refresh tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a token service reading the wall clock
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a token service with an injected clock
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock, not the library's
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl(&self) -> i64 {
        self.config.access_token_ttl
    }

    /// Signs a short-lived access token for the subject
    pub fn sign_access(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.sign(subject, TokenType::Access, self.config.access_token_ttl)
    }

    /// Signs a long-lived refresh token for the subject
    pub fn sign_refresh(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.sign(subject, TokenType::Refresh, self.config.refresh_token_ttl)
    }

    /// Signs both tokens for a freshly authenticated subject
    pub fn issue_pair(&self, subject: &TokenSubject) -> Result<TokenPair, TokenError> {
        let access_token = self.sign_access(subject)?;
        let refresh_token = self.sign_refresh(subject)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl,
        ))
    }

    /// Verifies an access token
    ///
    /// # Errors
    ///
    /// * `Malformed` - not a JWT, wrong algorithm, wrong issuer or bad claims
    /// * `SignatureInvalid` - signed with another key
    /// * `Expired` - `exp` is at or before the current time
    /// * `WrongTokenType` - a refresh token was presented
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_typed(token, TokenType::Access)
    }

    /// Verifies a refresh token; access tokens fail with `WrongTokenType`
    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_typed(token, TokenType::Refresh)
    }

    /// Exchanges a refresh token for a new access token
    ///
    /// The refresh token itself stays valid until it expires.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.verify_refresh(refresh_token)?;
        self.sign_access(&claims.subject())
    }

    fn sign(
        &self,
        subject: &TokenSubject,
        token_type: TokenType,
        ttl: i64,
    ) -> Result<String, TokenError> {
        let now = self.clock.now();
        let claims = TokenClaims {
            sub: subject.username.clone(),
            id: subject.account_id,
            role: subject.role,
            token_type,
            iat: now,
            exp: now + ttl,
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign {} token", token_type);
            TokenError::SigningFailed
        })
    }

    fn verify_typed(&self, token: &str, expected: TokenType) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            },
        )?;
        let claims = data.claims;

        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        if claims.token_type != expected {
            return Err(TokenError::WrongTokenType {
                expected,
                actual: claims.token_type,
            });
        }

        Ok(claims)
    }
}
