//! Handlers for `/v1/person` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/v1/person` | Body: [`PersonInput`]; 201 + stored person, 409 if the OIB exists |
//! | `GET`    | `/v1/person?oib=<oib>` | Person or `null` |
//! | `DELETE` | `/v1/person/{oib}` | Outcome text; also deactivates the person's requests |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use cardreq_core::{
  ledger::RequestLedger,
  person::{Person, PersonInput},
  store::PersonStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, validate};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /v1/person`
pub async fn create<P, L>(
  State(state): State<AppState<P, L>>,
  Json(body): Json<PersonInput>,
) -> Result<impl IntoResponse, ApiError>
where
  P: PersonStore + 'static,
  L: RequestLedger + 'static,
{
  validate::person_input(&body)?;
  let person = state.persons.create_person(body).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub oib: String,
}

/// `GET /v1/person?oib=<oib>`
pub async fn search<P, L>(
  State(state): State<AppState<P, L>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Option<Person>>, ApiError>
where
  P: PersonStore + 'static,
  L: RequestLedger + 'static,
{
  let person = state.persons.search(&params.oib).await?;
  Ok(Json(person))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /v1/person/{oib}`
pub async fn delete<P, L>(
  State(state): State<AppState<P, L>>,
  Path(oib): Path<String>,
) -> Result<String, ApiError>
where
  P: PersonStore + 'static,
  L: RequestLedger + 'static,
{
  let outcome = state.persons.delete(&oib).await?;
  Ok(outcome.to_string())
}
