//! Error type for `cardreq-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The OIB is already registered (unique key violation).
  #[error("person with oib {0} already exists")]
  DuplicatePerson(String),

  #[error("unknown person status in database: {0:?}")]
  UnknownStatus(String),
}

impl From<Error> for cardreq_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::DuplicatePerson(oib) => Self::PersonAlreadyExists(oib),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
