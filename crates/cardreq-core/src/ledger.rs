//! The `RequestLedger` trait.
//!
//! A ledger keeps one entry per credit-card request, addressable by a
//! location (a file path for the filesystem backend). Entries are appended on
//! creation and rewritten in place when their status changes; they are never
//! removed.

use std::{
  future::Future,
  path::{Path, PathBuf},
};

use crate::record::RequestRecord;

/// An entry read back from the ledger together with where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
  pub location: PathBuf,
  pub record:   RequestRecord,
}

/// Abstraction over request history storage.
///
/// The ledger does not enforce the single-active-request rule; that is the
/// job of [`crate::coordinator::RequestCoordinator`].
pub trait RequestLedger: Send + Sync {
  /// Backend error. Converting into [`crate::Error`] must map undecodable
  /// entries to [`crate::Error::InvalidEntry`].
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Write `record` to a fresh location derived from its OIB and the current
  /// time. Never overwrites an existing entry.
  fn append<'a>(
    &'a self,
    record: &'a RequestRecord,
  ) -> impl Future<Output = Result<PathBuf, Self::Error>> + Send + 'a;

  /// Replace the entry at an existing `location` with `record`.
  fn rewrite<'a>(
    &'a self,
    location: &'a Path,
    record: &'a RequestRecord,
  ) -> impl Future<Output = Result<PathBuf, Self::Error>> + Send + 'a;

  /// Every location belonging to `oib`, in a stable order. Empty when the
  /// ledger holds nothing for it (or does not exist yet).
  fn list_locations<'a>(
    &'a self,
    oib: &'a str,
  ) -> impl Future<Output = Result<Vec<PathBuf>, Self::Error>> + Send + 'a;

  /// Decode every entry for `oib` and keep the ACTIVE ones.
  ///
  /// A single undecodable entry fails the whole call.
  fn load_active<'a>(
    &'a self,
    oib: &'a str,
  ) -> impl Future<Output = Result<Vec<LedgerEntry>, Self::Error>> + Send + 'a;

  fn has_active<'a>(
    &'a self,
    oib: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a {
    async move { Ok(!self.load_active(oib).await?.is_empty()) }
  }
}
