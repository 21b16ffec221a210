//! [`SqliteStore`] — the SQLite implementation of
//! [`carnet_core::store::ContactStore`].

use std::{path::Path, time::Duration};

use rusqlite::OptionalExtension as _;

use carnet_core::{
  Contact, Error, NewContact, Result,
  store::ContactStore,
};

use crate::{
  encode::{COLUMNS, RawContact, map_db_err},
  schema::SCHEMA,
};

/// How long an operation may wait on the storage thread before failing with
/// [`Error::Unavailable`].
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Carnet contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation is bounded by an acquisition timeout so callers never hang on an
/// exhausted or wedged storage thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn:       tokio_rusqlite::Connection,
  op_timeout: Duration,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(map_db_err)?;
    let store = Self { conn, op_timeout: DEFAULT_OP_TIMEOUT };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(map_db_err)?;
    let store = Self { conn, op_timeout: DEFAULT_OP_TIMEOUT };
    store.init_schema().await?;
    Ok(store)
  }

  /// Release the connection. Pending operations fail with
  /// [`Error::Unavailable`] afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await.map_err(map_db_err)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Run `f` on the storage thread with a bounded wait.
  async fn call<F, T>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<T>
      + Send
      + 'static,
    T: Send + 'static,
  {
    match tokio::time::timeout(self.op_timeout, self.conn.call(f)).await {
      Ok(res) => res.map_err(map_db_err),
      Err(_) => Err(Error::Unavailable(format!(
        "storage did not respond within {:?}",
        self.op_timeout
      ))),
    }
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  async fn create(&self, new: NewContact) -> Result<Contact> {
    let raw = self
      .call(move |conn| {
        let sql = format!(
          "INSERT INTO users (nom, prenom, adresse, email, telephone)
           VALUES (?1, ?2, ?3, ?4, ?5)
           RETURNING {COLUMNS}"
        );
        let raw = conn.query_row(
          &sql,
          rusqlite::params![
            new.nom,
            new.prenom,
            new.adresse,
            new.email,
            new.telephone,
          ],
          RawContact::from_row,
        )?;
        Ok(raw)
      })
      .await?;

    raw.into_contact()
  }

  async fn find_all(&self) -> Result<Vec<Contact>> {
    let raws = self
      .call(|conn| {
        let sql = format!(
          "SELECT {COLUMNS} FROM users
           ORDER BY date_creation DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Contact>> {
    let raw = self
      .call(move |conn| {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawContact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
    let email = email.to_owned();
    let raw = self
      .call(move |conn| {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![email], RawContact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn update(&self, id: i64, new: NewContact) -> Result<Contact> {
    let raw = self
      .call(move |conn| {
        // date_creation is deliberately not in the SET list.
        let sql = format!(
          "UPDATE users
           SET nom = ?1, prenom = ?2, adresse = ?3, email = ?4, telephone = ?5
           WHERE id = ?6
           RETURNING {COLUMNS}"
        );
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params![
                new.nom,
                new.prenom,
                new.adresse,
                new.email,
                new.telephone,
                id,
              ],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::NotFound(id))
      .and_then(RawContact::into_contact)
  }

  async fn delete(&self, id: i64) -> Result<Contact> {
    let raw = self
      .call(move |conn| {
        let sql =
          format!("DELETE FROM users WHERE id = ?1 RETURNING {COLUMNS}");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawContact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::NotFound(id))
      .and_then(RawContact::into_contact)
  }
}
