//! Contact — the single persisted entity.
//!
//! Three shapes, one per stage of the request pipeline: [`ContactInput`] is
//! the raw submission, [`NewContact`] the validated/normalized form accepted
//! by the store, and [`Contact`] the stored row with its server-assigned
//! identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored contact record.
///
/// `id` and `date_creation` are assigned by the store at insert time and
/// never change afterwards. Field names match the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  pub id:            i64,
  pub nom:           String,
  pub prenom:        String,
  pub adresse:       String,
  pub email:         String,
  pub telephone:     String,
  pub date_creation: DateTime<Utc>,
}

/// Raw candidate record, exactly as submitted.
///
/// Absent JSON fields default to empty strings so they come back as field
/// violations instead of a body-level deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
  #[serde(default)]
  pub nom:       String,
  #[serde(default)]
  pub prenom:    String,
  #[serde(default)]
  pub adresse:   String,
  #[serde(default)]
  pub email:     String,
  #[serde(default)]
  pub telephone: String,
}

/// A validated, normalized record ready for persistence.
///
/// Only [`crate::validate::validate`] produces these: names and address are
/// trimmed, the email is trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
  pub nom:       String,
  pub prenom:    String,
  pub adresse:   String,
  pub email:     String,
  pub telephone: String,
}
