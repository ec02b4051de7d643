//! # RentLedger Shared Library
//!
//! Domain types, the payment ledger engine, persistence and services used by
//! the RentLedger API server.
//!
//! ## Module Organization
//!
//! - `ledger`: derived payment fields, payment mutations, status and aggregates
//! - `models`: users, tenants, family members, messages
//! - `store`: the `RecordStore` trait with in-memory and PostgreSQL backends
//! - `db`: PostgreSQL pool and migrations
//! - `services`: account, ledger and tenant operations over an injected store
//! - `auth`: password hashing, JWT tokens, request auth middleware
//! - `error`: shared error types

pub mod auth;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the RentLedger shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
