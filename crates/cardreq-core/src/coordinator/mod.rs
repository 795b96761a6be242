//! Coordinators that keep the person store and the request ledger in step.
//!
//! [`RequestCoordinator`] owns the request lifecycle and the
//! single-active-request rule; [`PersonCoordinator`] handles person
//! registration and cascades deactivation on deletion.

mod person;
mod request;

use std::fmt;

pub use person::PersonCoordinator;
pub use request::RequestCoordinator;

use crate::Error;

/// Result of [`RequestCoordinator::complete_request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
  /// This many active requests were flipped to INACTIVE.
  Completed(usize),
  NothingToComplete,
}

impl CompletionOutcome {
  fn from_count(count: usize) -> Self {
    if count > 0 {
      Self::Completed(count)
    } else {
      Self::NothingToComplete
    }
  }
}

impl fmt::Display for CompletionOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Completed(count) => write!(f, "completed: {count}"),
      Self::NothingToComplete => f.write_str("no active requests to complete"),
    }
  }
}

/// Result of [`PersonCoordinator::delete`].
///
/// Deletion happens in two phases. The person rows are removed first and that
/// commits on its own; the ledger cascade runs afterwards and its result is
/// carried here instead of failing the delete.
#[derive(Debug)]
pub enum DeletionOutcome {
  Deleted {
    /// Person rows removed.
    deleted: usize,
    /// Requests deactivated by the cascade, or why it stopped.
    cascade: Result<usize, Error>,
  },
  NothingToDelete,
}

impl fmt::Display for DeletionOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Deleted { deleted, .. } => write!(f, "person deleted: {deleted}"),
      Self::NothingToDelete => f.write_str("nothing to delete"),
    }
  }
}

/// Lift a backend error into the core taxonomy.
fn lift<E: Into<Error>>(err: E) -> Error { err.into() }
