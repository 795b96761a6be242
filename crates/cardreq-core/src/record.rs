//! Credit-card request records and their single-line ledger encoding.
//!
//! An entry is one line of four space-separated fields:
//!
//! ```text
//! <name> <last_name> <oib> <STATUS>
//! ```
//!
//! There is no escaping, so no field may contain whitespace. Only the first
//! line of an entry is significant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::Status;

/// Number of fields in a well-formed ledger entry.
pub const ENTRY_FIELDS: usize = 4;

/// One credit-card request. Its creation time lives in the ledger location,
/// not in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
  pub oib:       String,
  pub name:      String,
  pub last_name: String,
  pub status:    Status,
}

/// Why a ledger entry could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
  #[error("credit card request entry contains no information")]
  Empty,

  #[error(
    "request could not be read properly - malformed entry \
     (expected {expected} fields, found {fields})",
    expected = ENTRY_FIELDS
  )]
  Malformed { fields: usize },

  #[error("invalid status to parse: {0:?}")]
  UnknownStatus(String),
}

impl RequestRecord {
  pub fn with_status(mut self, status: Status) -> Self {
    self.status = status;
    self
  }

  /// Encode as a single ledger line (no trailing newline).
  pub fn to_entry(&self) -> String {
    format!(
      "{} {} {} {}",
      self.name, self.last_name, self.oib, self.status
    )
  }

  /// Decode the first line of a ledger entry.
  pub fn from_entry(entry: &str) -> Result<Self, EntryError> {
    let line = entry.lines().next().unwrap_or_default();
    if line.trim().is_empty() {
      return Err(EntryError::Empty);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, last_name, oib, status] = fields.as_slice() else {
      return Err(EntryError::Malformed { fields: fields.len() });
    };

    let status = status
      .parse::<Status>()
      .map_err(|_| EntryError::UnknownStatus((*status).to_owned()))?;

    Ok(Self {
      oib: (*oib).to_owned(),
      name: (*name).to_owned(),
      last_name: (*last_name).to_owned(),
      status,
    })
  }
}

impl FromStr for RequestRecord {
  type Err = EntryError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_entry(s) }
}
