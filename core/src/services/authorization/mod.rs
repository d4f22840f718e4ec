//! Per-request authorization decisions

mod gate;

#[cfg(test)]
mod tests;

pub use gate::{bearer_token, AuthorizationGate};
