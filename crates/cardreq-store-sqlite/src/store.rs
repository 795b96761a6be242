//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::path::Path;

use cardreq_core::{person::Person, status::Status, store::PersonStore};
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{
  Error, Result,
  encode::{RawPerson, encode_status},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Whether `err` is SQLite rejecting a duplicate key.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
  )
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, person: Person) -> Result<Person> {
    let oib        = person.oib.clone();
    let name       = person.name.clone();
    let last_name  = person.last_name.clone();
    let status_str = encode_status(person.status);

    let inserted = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT INTO persons (oib, name, last_name, status) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![oib, name, last_name, status_str],
        ) {
          Ok(_) => Ok(true),
          Err(e) if is_unique_violation(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicatePerson(person.oib));
    }
    debug!(oib = %person.oib, "person row inserted");
    Ok(person)
  }

  async fn find_latest(&self, oib: &str) -> Result<Option<Person>> {
    let oib = oib.to_owned();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM persons WHERE oib = ?1 ORDER BY row_id DESC LIMIT 1",
          RawPerson::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![oib], RawPerson::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn update_status(&self, oib: &str, status: Status) -> Result<usize> {
    let oib        = oib.to_owned();
    let status_str = encode_status(status);

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons SET status = ?1 WHERE oib = ?2",
          rusqlite::params![status_str, oib],
        )?)
      })
      .await?;

    Ok(updated)
  }

  async fn delete(&self, oib: &str) -> Result<usize> {
    let oib = oib.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE oib = ?1",
          rusqlite::params![oib],
        )?)
      })
      .await?;

    Ok(deleted)
  }
}
