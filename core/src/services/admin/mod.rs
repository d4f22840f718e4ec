//! Account administration: listing accounts and organizations, changing
//! account status or role

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccountListing, AdminService, Organization, MAX_PAGE_SIZE};
