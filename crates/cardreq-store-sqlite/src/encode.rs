//! Conversions between domain types and their SQLite column representations.

use cardreq_core::{person::Person, status::Status};

use crate::{Error, Result};

pub fn encode_status(status: Status) -> &'static str { status.as_str() }

pub fn decode_status(raw: &str) -> Result<Status> {
  raw.parse().map_err(|_| Error::UnknownStatus(raw.to_owned()))
}

/// A `persons` row exactly as read from SQLite.
pub struct RawPerson {
  pub oib:       String,
  pub name:      String,
  pub last_name: String,
  pub status:    String,
}

impl RawPerson {
  pub const COLUMNS: &'static str = "oib, name, last_name, status";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      oib:       row.get(0)?,
      name:      row.get(1)?,
      last_name: row.get(2)?,
      status:    row.get(3)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      status:    decode_status(&self.status)?,
      oib:       self.oib,
      name:      self.name,
      last_name: self.last_name,
    })
  }
}
