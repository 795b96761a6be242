//! [`PersonCoordinator`]: register, look up and delete persons.

use std::sync::Arc;

use tracing::{info, warn};

use super::{DeletionOutcome, RequestCoordinator, lift};
use crate::{
  Result,
  ledger::RequestLedger,
  person::{Person, PersonInput},
  status::Status,
  store::PersonStore,
};

pub struct PersonCoordinator<P, L> {
  persons:  Arc<P>,
  requests: RequestCoordinator<P, L>,
}

impl<P, L> Clone for PersonCoordinator<P, L> {
  fn clone(&self) -> Self {
    Self {
      persons:  Arc::clone(&self.persons),
      requests: self.requests.clone(),
    }
  }
}

impl<P: PersonStore, L: RequestLedger> PersonCoordinator<P, L> {
  /// `requests` receives the deactivation cascade on deletion; it should
  /// share `persons` with this coordinator.
  pub fn new(persons: Arc<P>, requests: RequestCoordinator<P, L>) -> Self {
    Self { persons, requests }
  }

  /// Register a person. New persons start INACTIVE: nothing is in progress
  /// for them until a request is created.
  pub async fn create_person(&self, input: PersonInput) -> Result<Person> {
    let person = self
      .persons
      .insert(input.into_person(Status::Inactive))
      .await
      .map_err(lift)?;
    info!(oib = %person.oib, "person added");
    Ok(person)
  }

  pub async fn search(&self, oib: &str) -> Result<Option<Person>> {
    let found = self.persons.find_latest(oib).await.map_err(lift)?;
    info!(%oib, found = found.is_some(), "person search");
    Ok(found)
  }

  /// Delete the person and deactivate their requests on a best-effort basis.
  ///
  /// The deletion stands even if the cascade fails; the cascade error is
  /// logged and returned inside the outcome.
  pub async fn delete(&self, oib: &str) -> Result<DeletionOutcome> {
    let deleted = self.persons.delete(oib).await.map_err(lift)?;
    info!(%oib, deleted, "person(s) deleted");
    if deleted == 0 {
      return Ok(DeletionOutcome::NothingToDelete);
    }

    let cascade = self.requests.deactivate_all_active(oib).await;
    match &cascade {
      Ok(count) => info!(%oib, count, "credit card requests deactivated"),
      Err(err) => warn!(%oib, error = %err, "credit card request cascade failed"),
    }

    Ok(DeletionOutcome::Deleted { deleted, cascade })
  }
}
