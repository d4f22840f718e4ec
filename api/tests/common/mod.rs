//! Fixtures shared by the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header::AUTHORIZATION, test, web};
use serde_json::Value;

use sg_api::AppState;
use sg_core::domain::entities::account::{Account, AccountStatus, Role};
use sg_core::domain::entities::token::TokenSubject;
use sg_core::repositories::{AccountRepository, InMemoryAccountRepository};
use sg_core::services::auth::hash_password;
use sg_core::services::MemoryConnector;
use sg_shared::{AppConfig, JwtConfig};

pub const PASSWORD: &str = "Str0ng!pass";
pub const ROOT: &str = "/upload";
pub const UPLOAD_LIMIT: u64 = 1024;

/// Application state wired to in-memory accounts and an in-memory remote store
pub struct Harness {
    pub accounts: InMemoryAccountRepository,
    pub remote: MemoryConnector,
    pub state: web::Data<AppState>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_remote(MemoryConnector::with_root(ROOT))
    }

    /// Uses a caller-prepared remote store, e.g. one with latency
    pub fn with_remote(remote: MemoryConnector) -> Self {
        let config = config();
        let accounts = InMemoryAccountRepository::new();
        let state = AppState::new(
            &config,
            Arc::new(accounts.clone()),
            Arc::new(remote.clone()),
        );

        Self {
            accounts,
            remote,
            state: web::Data::new(state),
        }
    }

    pub async fn seed(&self, username: &str, role: Role, status: AccountStatus) -> Account {
        let hash = hash_password(PASSWORD, 4).await.unwrap();
        let account = Account::new(username, format!("{}@example.com", username), hash)
            .with_role(role)
            .with_status(status);
        self.accounts.create(account).await.unwrap()
    }

    pub async fn account(&self, username: &str) -> Account {
        self.accounts
            .find_by_username(username)
            .await
            .unwrap()
            .expect("seeded account")
    }

    /// Authorization header carrying a fresh access token for `account`
    pub fn bearer(&self, account: &Account) -> (actix_web::http::header::HeaderName, String) {
        let subject = TokenSubject::new(account.username.clone(), account.id, account.role);
        let token = self.state.tokens.sign_access(&subject).unwrap();
        (AUTHORIZATION, format!("Bearer {}", token))
    }
}

pub fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt = JwtConfig::new("integration-secret");
    config.auth.bcrypt_cost = 4;
    config.sandbox.root = ROOT.to_string();
    config.sandbox.max_upload_bytes = UPLOAD_LIMIT;
    config
}

pub async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    test::read_body_json(resp).await
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
