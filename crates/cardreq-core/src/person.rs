//! Person rows and the input shape shared by person and request creation.

use serde::{Deserialize, Serialize};

use crate::{record::RequestRecord, status::Status};

/// A person as stored in the person store.
///
/// `oib` is the subject identifier: it correlates the person row with its
/// request ledger entries and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub oib:       String,
  pub name:      String,
  pub last_name: String,
  pub status:    Status,
}

/// Caller-supplied person data.
///
/// Used both to register a person and to open or complete a credit-card
/// request for one. A supplied `status` is accepted for wire compatibility
/// but never trusted; the coordinators always choose the status themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonInput {
  pub oib:       String,
  pub name:      String,
  pub last_name: String,
  pub status:    Option<Status>,
}

impl PersonInput {
  pub fn new(
    oib: impl Into<String>,
    name: impl Into<String>,
    last_name: impl Into<String>,
  ) -> Self {
    Self {
      oib:       oib.into(),
      name:      name.into(),
      last_name: last_name.into(),
      status:    None,
    }
  }

  pub fn into_person(self, status: Status) -> Person {
    Person {
      oib: self.oib,
      name: self.name,
      last_name: self.last_name,
      status,
    }
  }

  pub fn into_record(self, status: Status) -> RequestRecord {
    RequestRecord {
      oib: self.oib,
      name: self.name,
      last_name: self.last_name,
      status,
    }
  }
}
