//! The ACTIVE / INACTIVE flag shared by persons and request records.

use serde::{Deserialize, Serialize};

/// Whether a person or a request record is currently in progress.
///
/// The upper-case token (`ACTIVE`, `INACTIVE`) is the only representation
/// used on the wire, in the database, and in ledger entries.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
  Active,
  Inactive,
}

impl Status {
  pub fn is_active(self) -> bool { matches!(self, Self::Active) }

  pub fn as_str(self) -> &'static str { self.into() }
}
