pub mod account;

pub use account::{AccountFilter, AccountRepository, InMemoryAccountRepository};
