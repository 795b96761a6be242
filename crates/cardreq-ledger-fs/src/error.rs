//! Error type for `cardreq-ledger-fs`.

use std::{io, path::PathBuf};

use cardreq_core::record::EntryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to create ledger directory {}: {source}", .path.display())]
  CreateDir {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write ledger entry {}: {source}", .path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read ledger entry {}: {source}", .path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to list ledger directory {}: {source}", .path.display())]
  List {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid ledger entry {}: {source}", .path.display())]
  Entry {
    path:   PathBuf,
    #[source]
    source: EntryError,
  },
}

impl From<Error> for cardreq_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Entry { path, source } => Self::InvalidEntry { location: path, source },
      other => Self::Ledger(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
