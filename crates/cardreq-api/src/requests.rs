//! Handlers for `/v1/credit-card-request` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/v1/credit-card-request` | Body: [`PersonInput`]; 201 + `true`; 404 unknown person, 409 already active |
//! | `POST` | `/v1/credit-card-request/complete` | Body: [`PersonInput`]; outcome text |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use cardreq_core::{ledger::RequestLedger, person::PersonInput, store::PersonStore};

use crate::{AppState, error::ApiError, validate};

/// `POST /v1/credit-card-request`
pub async fn create<P, L>(
  State(state): State<AppState<P, L>>,
  Json(body): Json<PersonInput>,
) -> Result<impl IntoResponse, ApiError>
where
  P: PersonStore + 'static,
  L: RequestLedger + 'static,
{
  validate::person_input(&body)?;
  state.requests.create_request(body).await?;
  Ok((StatusCode::CREATED, Json(true)))
}

/// `POST /v1/credit-card-request/complete`
pub async fn complete<P, L>(
  State(state): State<AppState<P, L>>,
  Json(body): Json<PersonInput>,
) -> Result<String, ApiError>
where
  P: PersonStore + 'static,
  L: RequestLedger + 'static,
{
  validate::person_input(&body)?;
  let outcome = state.requests.complete_request(&body.oib).await?;
  Ok(outcome.to_string())
}
