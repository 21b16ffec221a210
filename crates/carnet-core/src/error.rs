//! Error types for `carnet-core`.
//!
//! Storage backends report failures through this taxonomy so that the HTTP
//! layer can pattern-match on failure kind without ever inspecting
//! backend-specific error details.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An insert or update collided with the unique index on `email`.
  #[error("email address is already in use")]
  DuplicateEmail,

  /// No record with the given identifier.
  #[error("contact not found: {0}")]
  NotFound(i64),

  /// The storage backend could not be reached within its bounded wait.
  #[error("storage unavailable: {0}")]
  Unavailable(String),

  /// Any other storage failure. Not retried; surfaced to the caller.
  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
