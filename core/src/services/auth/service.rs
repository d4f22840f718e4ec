//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::account::{Account, AccountStatus};
use crate::domain::entities::token::{AccessGrant, TokenPair, TokenSubject};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, validate_password, validate_username, verify_password};

/// Authentication service handling login, registration and token refresh
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        tokens: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            accounts,
            tokens,
            config,
        }
    }

    /// Authenticate with username and password
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - unknown username or wrong password
    /// * `AccountPending` / `AccountDisabled` - correct password, inactive account
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<TokenPair> {
        let account = self
            .accounts
            .find_by_username(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash).await? {
            tracing::info!(username = %account.username, "Login rejected: bad password");
            return Err(AuthError::InvalidCredentials.into());
        }

        ensure_active(&account)?;

        let subject = TokenSubject::new(account.username.clone(), account.id, account.role);
        let pair = self.tokens.issue_pair(&subject)?;

        tracing::info!(username = %account.username, role = %account.role, "Login succeeded");
        Ok(pair)
    }

    /// Register a new account, pending approval with the read-only role
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Account> {
        if !self.config.allow_registration {
            return Err(AuthError::Forbidden.into());
        }

        validate_username(username)?;
        validate_password(password)?;

        if self.accounts.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let account = self
            .accounts
            .create(Account::new(username, email, password_hash))
            .await?;

        tracing::info!(username = %account.username, account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The account must still exist and be active. The refresh token is not
    /// rotated.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AccessGrant> {
        let claims = self.tokens.verify_refresh(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            AuthError::InvalidRefreshToken
        })?;

        let account = self
            .accounts
            .find_by_id(claims.id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;
        ensure_active(&account)?;

        let access_token = self
            .tokens
            .refresh(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        Ok(AccessGrant {
            access_token,
            expires_in: self.tokens.access_token_ttl(),
        })
    }
}

fn ensure_active(account: &Account) -> Result<(), DomainError> {
    match account.status {
        AccountStatus::Active => Ok(()),
        AccountStatus::Pending => Err(AuthError::AccountPending.into()),
        AccountStatus::Disabled => Err(AuthError::AccountDisabled.into()),
    }
}
