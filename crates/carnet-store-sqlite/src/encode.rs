//! Decoding helpers between SQLite rows and domain types, plus the single
//! place where backend failures are translated into the
//! [`carnet_core::Error`] taxonomy.
//!
//! Timestamps are stored as RFC 3339 strings (the column default writes them
//! in that shape).

use chrono::{DateTime, Utc};

use carnet_core::{Contact, Error, Result};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// A `users` row as read from SQLite, before timestamp parsing.
pub struct RawContact {
  pub id:            i64,
  pub nom:           String,
  pub prenom:        String,
  pub adresse:       String,
  pub email:         String,
  pub telephone:     String,
  pub date_creation: String,
}

impl RawContact {
  /// Read the full column set from a row, in [`COLUMNS`] order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      nom:           row.get(1)?,
      prenom:        row.get(2)?,
      adresse:       row.get(3)?,
      email:         row.get(4)?,
      telephone:     row.get(5)?,
      date_creation: row.get(6)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:            self.id,
      nom:           self.nom,
      prenom:        self.prenom,
      adresse:       self.adresse,
      email:         self.email,
      telephone:     self.telephone,
      date_creation: decode_dt(&self.date_creation)?,
    })
  }
}

/// Column list shared by every SELECT/RETURNING clause, in the order
/// [`RawContact::from_row`] reads them.
pub const COLUMNS: &str =
  "id, nom, prenom, adresse, email, telephone, date_creation";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Storage(format!("bad timestamp {s:?}: {e}")))
}

// ─── Failure translation ─────────────────────────────────────────────────────

/// Map a backend failure to the domain taxonomy.
///
/// A violated UNIQUE index on `users.email` is the losing side of a create
/// race and becomes [`Error::DuplicateEmail`]; a closed connection becomes
/// [`Error::Unavailable`]; everything else is an opaque storage error.
pub fn map_db_err(err: tokio_rusqlite::Error) -> Error {
  match err {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, msg))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
        && msg.as_deref().is_some_and(|m| m.contains("users.email")) =>
    {
      Error::DuplicateEmail
    }
    tokio_rusqlite::Error::ConnectionClosed => {
      Error::Unavailable("connection closed".to_owned())
    }
    other => Error::Storage(other.to_string()),
  }
}
