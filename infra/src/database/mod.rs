//! Database module - PostgreSQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - The account repository

pub mod connection;
pub mod postgres;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::PgAccountRepository;
