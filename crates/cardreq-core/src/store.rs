//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `cardreq-store-sqlite`).
//! The coordinators depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{person::Person, status::Status};

/// Abstraction over the relational person table.
///
/// Rows are keyed by OIB. Status changes and deletions are single conditional
/// statements that report how many rows they touched; callers treat zero as
/// "no such person".
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  /// Backend error. Converting into [`crate::Error`] must classify a
  /// duplicate OIB as [`crate::Error::PersonAlreadyExists`].
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Persist a new person. Fails if the OIB is already taken.
  fn insert(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// The most recently inserted person with `oib`, if any.
  fn find_latest<'a>(
    &'a self,
    oib: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// Set the status of every row with `oib`; returns rows affected.
  fn update_status<'a>(
    &'a self,
    oib: &'a str,
    status: Status,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Delete every row with `oib`; returns rows affected.
  fn delete<'a>(
    &'a self,
    oib: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
