//! Per-subject mutual exclusion.
//!
//! Checking for an active request and appending a new one are two separate
//! ledger operations. Callers that hold the subject's guard across both see a
//! consistent ledger for that OIB.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Held while a subject's ledger entries are being checked or changed.
/// Dropping it releases the subject.
pub type SubjectGuard = OwnedMutexGuard<()>;

/// A table of async locks keyed by OIB.
///
/// Entries are created on demand and pruned once nobody holds or waits on
/// them.
#[derive(Debug, Default)]
pub struct SubjectLocks {
  table: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SubjectLocks {
  pub fn new() -> Self { Self::default() }

  /// Wait for exclusive access to `oib`.
  pub async fn acquire(&self, oib: &str) -> SubjectGuard {
    let lock = {
      let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
      // Only the table itself references an idle lock.
      table.retain(|_, lock| Arc::strong_count(lock) > 1);
      Arc::clone(table.entry(oib.to_owned()).or_default())
    };
    lock.lock_owned().await
  }

  /// Number of subjects currently tracked.
  #[cfg(test)]
  fn tracked(&self) -> usize {
    self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
  }
}
