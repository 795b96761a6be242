//! JSON REST API for credit-card request records.
//!
//! Exposes an axum [`Router`] backed by any [`PersonStore`] and
//! [`RequestLedger`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let state = cardreq_api::AppState::new(Arc::new(store), Arc::new(ledger));
//! axum::serve(listener, cardreq_api::api_router(state)).await?;
//! ```

pub mod error;
pub mod persons;
pub mod requests;
pub mod validate;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use cardreq_core::{
  coordinator::{PersonCoordinator, RequestCoordinator},
  ledger::RequestLedger,
  store::PersonStore,
};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<P, L> {
  pub persons:  PersonCoordinator<P, L>,
  pub requests: RequestCoordinator<P, L>,
}

impl<P, L> Clone for AppState<P, L> {
  fn clone(&self) -> Self {
    Self {
      persons:  self.persons.clone(),
      requests: self.requests.clone(),
    }
  }
}

impl<P: PersonStore, L: RequestLedger> AppState<P, L> {
  /// Wire both coordinators over one person store and one ledger.
  pub fn new(persons: Arc<P>, ledger: Arc<L>) -> Self {
    let requests = RequestCoordinator::new(Arc::clone(&persons), ledger);
    let persons = PersonCoordinator::new(persons, requests.clone());
    Self { persons, requests }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<P, L>(state: AppState<P, L>) -> Router<()>
where
  P: PersonStore + 'static,
  L: RequestLedger + 'static,
{
  Router::new()
    .route("/health", get(health))
    // Persons
    .route(
      "/v1/person",
      get(persons::search::<P, L>).post(persons::create::<P, L>),
    )
    .route("/v1/person/{oib}", delete(persons::delete::<P, L>))
    // Credit-card requests
    .route("/v1/credit-card-request", post(requests::create::<P, L>))
    .route(
      "/v1/credit-card-request/complete",
      post(requests::complete::<P, L>),
    )
    .with_state(state)
}

async fn health() -> &'static str { "ok" }
