//! SQL schema for the Carnet SQLite store.
//!
//! Executed at every connection startup; `IF NOT EXISTS` makes the batch
//! idempotent. `PRAGMA user_version` records the schema revision for future
//! migrations, which would check it before altering anything.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// - `AUTOINCREMENT` guarantees ids are never reused after a delete.
/// - The UNIQUE index on `email` is the authoritative uniqueness guard;
///   handler-level pre-checks are advisory only.
/// - `date_creation` defaults to the insertion instant (RFC 3339 UTC) and is
///   never written by an UPDATE.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    nom           TEXT NOT NULL,
    prenom        TEXT NOT NULL,
    adresse       TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    telephone     TEXT NOT NULL,
    date_creation TEXT NOT NULL
                  DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Listing is always newest-first.
CREATE INDEX IF NOT EXISTS users_date_creation_idx ON users(date_creation);

PRAGMA user_version = 1;
";
