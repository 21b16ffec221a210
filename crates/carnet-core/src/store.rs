//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `carnet-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.
//!
//! All failures come back as [`crate::Error`] values so callers can match on
//! failure kind; in particular a backend must report a violated email
//! uniqueness constraint as [`crate::Error::DuplicateEmail`], making the
//! database-level constraint the authoritative guard against two concurrent
//! creates racing past the application-level pre-check.

use std::future::Future;

use crate::{
  Result,
  contact::{Contact, NewContact},
};

/// Abstraction over a Carnet storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  /// Insert a validated record. The store assigns `id` and `date_creation`
  /// and returns the full stored record.
  fn create(
    &self,
    new: NewContact,
  ) -> impl Future<Output = Result<Contact>> + Send + '_;

  /// All records, newest first (creation timestamp descending).
  fn find_all(&self) -> impl Future<Output = Result<Vec<Contact>>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>>> + Send + '_;

  /// Retrieve a record by (normalized) email.
  ///
  /// Used as the uniqueness pre-check; advisory only — the unique index
  /// consulted by [`ContactStore::create`] is the source of truth.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>>> + Send + 'a;

  /// Replace all mutable fields of the record with the given id.
  /// `date_creation` is left untouched. Fails with
  /// [`crate::Error::NotFound`] if the id is absent.
  fn update(
    &self,
    id: i64,
    new: NewContact,
  ) -> impl Future<Output = Result<Contact>> + Send + '_;

  /// Remove a record, returning it. Fails with [`crate::Error::NotFound`]
  /// if the id is absent.
  fn delete(&self, id: i64) -> impl Future<Output = Result<Contact>> + Send + '_;
}
