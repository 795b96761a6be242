//! SQL schema for the person store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- row_id records insertion order; the newest row for an oib wins on lookup.
CREATE TABLE IF NOT EXISTS persons (
    row_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    oib        TEXT NOT NULL UNIQUE,
    name       TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    status     TEXT NOT NULL CHECK (status IN ('ACTIVE', 'INACTIVE'))
);

PRAGMA user_version = 1;
";
