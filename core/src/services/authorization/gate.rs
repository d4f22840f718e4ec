use std::sync::Arc;

use crate::domain::entities::account::{AccountStatus, Role};
use crate::domain::entities::principal::PrincipalContext;
use crate::errors::{AuthError, DomainError};
use crate::repositories::AccountRepository;
use crate::services::token::TokenService;

/// Extracts the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let token = header?.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Turns a bearer header into a principal, or the first failing check
///
/// Checks run in a fixed order and the first failure wins:
/// missing token, token verification, account lookup, pending, disabled,
/// then role membership. The account is read fresh on every call, so
/// disabling or demoting an account takes effect on its next request even
/// while its access token is still valid.
pub struct AuthorizationGate {
    tokens: Arc<TokenService>,
    accounts: Arc<dyn AccountRepository>,
}

impl AuthorizationGate {
    pub fn new(tokens: Arc<TokenService>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { tokens, accounts }
    }

    /// Authorizes a request carrying the given `Authorization` header value.
    /// An empty `required` set admits any active account.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required: &[Role],
    ) -> Result<PrincipalContext, DomainError> {
        let token = bearer_token(authorization).ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::TokenInvalid(e)
        })?;

        let account = self
            .accounts
            .find_by_id(claims.id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, account_id = %claims.id, "Account lookup failed");
                match e {
                    DomainError::Internal { .. } => e,
                    other => DomainError::internal(other.to_string()),
                }
            })?
            .ok_or(AuthError::AccountNotFound)?;

        match account.status {
            AccountStatus::Pending => return Err(AuthError::AccountPending.into()),
            AccountStatus::Disabled => return Err(AuthError::AccountDisabled.into()),
            AccountStatus::Active => {}
        }

        let principal = PrincipalContext::from(&account);
        if !principal.has_any_role(required) {
            tracing::info!(
                username = %principal.username,
                role = %principal.role,
                "Role not permitted for this route"
            );
            return Err(AuthError::Forbidden.into());
        }

        Ok(principal)
    }
}
