//! Username/password policy and bcrypt hashing

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DomainError, ValidationError};

/// Letters, digits and underscore
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

/// Characters a password may be built from
static PASSWORD_CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\d@$!%*?&#^]+$").unwrap());

const PASSWORD_SPECIALS: &str = "@$!%*?&#^";

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 100;

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(ValidationError::InvalidLength {
            field: "username".to_string(),
            min: USERNAME_MIN,
            max: USERNAME_MAX,
            actual: len,
        });
    }
    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
        });
    }
    Ok(())
}

/// Requires at least 8 characters with an upper and lower case letter, a
/// digit and one of `@$!%*?&#^`, drawn only from those classes.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err(ValidationError::InvalidLength {
            field: "password".to_string(),
            min: PASSWORD_MIN,
            max: PASSWORD_MAX,
            actual: len,
        });
    }

    let weak = |reason: &str| ValidationError::WeakPassword {
        reason: reason.to_string(),
    };

    if !PASSWORD_CHARSET_REGEX.is_match(password) {
        return Err(weak("contains unsupported characters"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(weak("missing a lowercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(weak("missing an uppercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(weak("missing a digit"));
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(weak("missing a special character"));
    }
    Ok(())
}

/// Hashes on the blocking pool
pub async fn hash_password(password: &str, cost: u32) -> Result<String, DomainError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
}

/// Verifies a password against a stored hash; a malformed hash never matches
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))?;

    match verified {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            Ok(false)
        }
    }
}
