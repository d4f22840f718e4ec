//! PostgreSQL implementation of the AccountRepository trait.
//!
//! Role and status are stored as their wire strings (`READ_WRITE`,
//! `PENDING`, ...) so the table can be inspected and seeded by hand.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::account::{Account, AccountStatus, Role};
use sg_core::errors::{AuthError, DomainError};
use sg_core::repositories::{AccountFilter, AccountRepository};

const ACCOUNT_COLUMNS: &str =
    "id, username, email, password_hash, role, status, created_at, updated_at";

/// PostgreSQL implementation of AccountRepository
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &PgRow) -> Result<Account, DomainError> {
        let role: String = row.try_get("role").map_err(column_error("role"))?;
        let status: String = row.try_get("status").map_err(column_error("status"))?;

        Ok(Account {
            id: row.try_get("id").map_err(column_error("id"))?,
            username: row.try_get("username").map_err(column_error("username"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            role: parse_column::<Role>("role", &role)?,
            status: parse_column::<AccountStatus>("status", &status)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1 LIMIT 1", ACCOUNT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE username = $1 LIMIT 1",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, username, email, password_hash, role, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(account.id)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(account.status.as_str())
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::from(AuthError::UsernameTaken)
                }
                other => query_error(other),
            })?;

        Ok(account)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<Option<Account>, DomainError> {
        let sql = format!(
            "UPDATE accounts SET status = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Account>, DomainError> {
        let sql = format!(
            "UPDATE accounts SET role = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(role.as_str())
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, DomainError> {
        let sql = format!(
            "SELECT {} FROM accounts \
             WHERE ($1::text IS NULL OR status = $1) AND ($2::text IS NULL OR role = $2) \
             ORDER BY created_at DESC, username ASC \
             LIMIT $3 OFFSET $4",
            ACCOUNT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.role.map(|r| r.as_str()))
            .bind(i64::from(filter.limit))
            .bind(i64::from(filter.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(Self::row_to_account).collect()
    }

    async fn count(&self, filter: &AccountFilter) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accounts \
             WHERE ($1::text IS NULL OR status = $1) AND ($2::text IS NULL OR role = $2)",
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.role.map(|r| r.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Account query failed");
    DomainError::internal(format!("Database query failed: {}", e))
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::internal(format!("Failed to get {}: {}", column, e))
}

/// Parses a stored enum column, treating unknown values as corruption
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| DomainError::internal(format!("Invalid {} column: {}", column, e)))
}
