//! Error types for `cardreq-core`.
//!
//! Every failure carries an [`ErrorKind`] so outer layers can map it onto
//! their own status codes without matching individual variants.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::EntryError;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The referenced person does not exist.
  NotFound,
  /// An active request or a person with the same OIB already exists.
  Conflict,
  /// I/O failure, malformed ledger entry, or unclassified store failure.
  Internal,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("person with oib {0} does not exist")]
  PersonNotFound(String),

  #[error("person with oib {0} does not exist for completion")]
  PersonNotFoundForCompletion(String),

  #[error("request already active for person with oib {0}")]
  ActiveRequestExists(String),

  #[error("person with oib {0} already exists")]
  PersonAlreadyExists(String),

  #[error("invalid ledger entry {}: {source}", .location.display())]
  InvalidEntry {
    location: PathBuf,
    #[source]
    source:   EntryError,
  },

  #[error("ledger error: {0}")]
  Ledger(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::PersonNotFound(_) | Self::PersonNotFoundForCompletion(_) => {
        ErrorKind::NotFound
      }
      Self::ActiveRequestExists(_) | Self::PersonAlreadyExists(_) => {
        ErrorKind::Conflict
      }
      Self::InvalidEntry { .. } | Self::Ledger(_) | Self::Store(_) => {
        ErrorKind::Internal
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
