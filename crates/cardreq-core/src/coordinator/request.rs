//! [`RequestCoordinator`]: create, complete and deactivate credit-card
//! requests.

use std::{path::PathBuf, sync::Arc};

use tracing::info;

use super::{CompletionOutcome, lift};
use crate::{
  Error, Result,
  ledger::RequestLedger,
  lock::SubjectLocks,
  person::PersonInput,
  status::Status,
  store::PersonStore,
};

/// Orchestrates request operations across the person store and the ledger.
///
/// Cloning is cheap; clones share the stores and the subject lock table, so
/// the single-active-request rule holds across all of them.
pub struct RequestCoordinator<P, L> {
  persons: Arc<P>,
  ledger:  Arc<L>,
  locks:   Arc<SubjectLocks>,
}

impl<P, L> Clone for RequestCoordinator<P, L> {
  fn clone(&self) -> Self {
    Self {
      persons: Arc::clone(&self.persons),
      ledger:  Arc::clone(&self.ledger),
      locks:   Arc::clone(&self.locks),
    }
  }
}

impl<P: PersonStore, L: RequestLedger> RequestCoordinator<P, L> {
  pub fn new(persons: Arc<P>, ledger: Arc<L>) -> Self {
    Self { persons, ledger, locks: Arc::new(SubjectLocks::new()) }
  }

  /// Open a credit-card request for the person identified by `input.oib`.
  ///
  /// The person is marked ACTIVE before the ledger is consulted, so a request
  /// rejected with [`Error::ActiveRequestExists`] still leaves the person
  /// ACTIVE.
  pub async fn create_request(&self, input: PersonInput) -> Result<PathBuf> {
    let record = input.into_record(Status::Active);

    let updated = self
      .persons
      .update_status(&record.oib, Status::Active)
      .await
      .map_err(lift)?;
    if updated == 0 {
      return Err(Error::PersonNotFound(record.oib));
    }

    let _guard = self.locks.acquire(&record.oib).await;

    if self.ledger.has_active(&record.oib).await.map_err(lift)? {
      return Err(Error::ActiveRequestExists(record.oib));
    }

    let location = self.ledger.append(&record).await.map_err(lift)?;
    info!(oib = %record.oib, location = %location.display(), "credit card request created");
    Ok(location)
  }

  /// Flip every ACTIVE entry for `oib` to INACTIVE in place.
  ///
  /// Not transactional: the first failed rewrite aborts the loop and earlier
  /// entries stay deactivated.
  pub async fn deactivate_all_active(&self, oib: &str) -> Result<usize> {
    let _guard = self.locks.acquire(oib).await;

    let active = self.ledger.load_active(oib).await.map_err(lift)?;
    for entry in &active {
      let record = entry.record.clone().with_status(Status::Inactive);
      let location = self
        .ledger
        .rewrite(&entry.location, &record)
        .await
        .map_err(lift)?;
      info!(%oib, location = %location.display(), "credit card request deactivated");
    }

    Ok(active.len())
  }

  /// Mark the person INACTIVE and deactivate all of their active requests.
  pub async fn complete_request(&self, oib: &str) -> Result<CompletionOutcome> {
    let updated = self
      .persons
      .update_status(oib, Status::Inactive)
      .await
      .map_err(lift)?;
    if updated == 0 {
      return Err(Error::PersonNotFoundForCompletion(oib.to_owned()));
    }

    let count = self.deactivate_all_active(oib).await?;
    info!(%oib, count, "credit card request(s) completed");
    Ok(CompletionOutcome::from_count(count))
  }
}
