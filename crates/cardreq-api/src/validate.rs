//! Request body validation.
//!
//! Ledger entries are whitespace-separated with no escaping, so names and
//! OIBs must be single non-blank tokens before they reach the coordinators.

use cardreq_core::person::PersonInput;

use crate::error::ApiError;

/// An OIB is exactly this many ASCII digits, which also keeps it free of
/// whitespace.
pub const OIB_LEN: usize = 11;

pub fn oib(oib: &str) -> Result<(), ApiError> {
  if oib.trim().is_empty() {
    return Err(ApiError::BadRequest("oib cannot be blank".into()));
  }
  if oib.chars().count() != OIB_LEN || !oib.chars().all(|c| c.is_ascii_digit()) {
    return Err(ApiError::BadRequest(format!(
      "oib must contain exactly {OIB_LEN} digits"
    )));
  }
  Ok(())
}

fn name_field(field: &str, value: &str) -> Result<(), ApiError> {
  if value.trim().is_empty() {
    return Err(ApiError::BadRequest(format!("{field} cannot be blank")));
  }
  if value.chars().any(char::is_whitespace) {
    return Err(ApiError::BadRequest(format!(
      "{field} cannot contain whitespace"
    )));
  }
  Ok(())
}

pub fn person_input(input: &PersonInput) -> Result<(), ApiError> {
  oib(&input.oib)?;
  name_field("name", &input.name)?;
  name_field("lastName", &input.last_name)?;
  Ok(())
}
