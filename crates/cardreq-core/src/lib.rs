//! Core types, trait definitions and coordinators for credit-card request
//! records.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! person store and the request ledger are reached only through the traits in
//! [`store`] and [`ledger`]; concrete backends live in their own crates.

pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod lock;
pub mod person;
pub mod record;
pub mod status;
pub mod store;

pub use error::{Error, ErrorKind, Result};

#[cfg(test)]
mod tests;
