//! Field validators for contact submissions.
//!
//! Every rule is applied independently and all violations are collected into
//! one batch, so a client can show errors on every field at once instead of
//! fixing them one round-trip at a time.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::contact::{ContactInput, NewContact};

// ─── Length limits ───────────────────────────────────────────────────────────

pub const NAME_MIN:    usize = 2;
pub const NAME_MAX:    usize = 100;
pub const ADDRESS_MIN: usize = 10;
pub const ADDRESS_MAX: usize = 500;
pub const EMAIL_MAX:   usize = 150;

// ─── Patterns ────────────────────────────────────────────────────────────────

/// Letters (any script, so accented characters pass), spaces, hyphens,
/// apostrophes.
static NAME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[\pL\s'-]+$").unwrap());

/// `local@domain.tld` — no whitespace or extra `@`, and the domain must
/// contain a dot, so `a@b` is rejected.
static EMAIL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// French national number with all whitespace already stripped: a leading
/// zero, a nonzero second digit, then eight more digits.
static PHONE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^0[1-9][0-9]{8}$").unwrap());

// ─── Violation ───────────────────────────────────────────────────────────────

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
  pub field:   &'static str,
  pub message: String,
  pub value:   String,
}

impl Violation {
  fn new(field: &'static str, message: impl Into<String>, value: &str) -> Self {
    Self { field, message: message.into(), value: value.to_owned() }
  }
}

// ─── Per-field rules ─────────────────────────────────────────────────────────

fn check_name(field: &'static str, raw: &str, out: &mut Vec<Violation>) -> String {
  let trimmed = raw.trim();
  let len = trimmed.chars().count();
  if len < NAME_MIN || len > NAME_MAX {
    out.push(Violation::new(
      field,
      format!("must be between {NAME_MIN} and {NAME_MAX} characters"),
      raw,
    ));
  }
  if !trimmed.is_empty() && !NAME_RE.is_match(trimmed) {
    out.push(Violation::new(
      field,
      "may only contain letters, spaces, hyphens and apostrophes",
      raw,
    ));
  }
  trimmed.to_owned()
}

fn check_address(raw: &str, out: &mut Vec<Violation>) -> String {
  let trimmed = raw.trim();
  let len = trimmed.chars().count();
  if len < ADDRESS_MIN || len > ADDRESS_MAX {
    out.push(Violation::new(
      "adresse",
      format!("must be between {ADDRESS_MIN} and {ADDRESS_MAX} characters"),
      raw,
    ));
  }
  trimmed.to_owned()
}

fn check_email(raw: &str, out: &mut Vec<Violation>) -> String {
  let normalized = raw.trim().to_lowercase();
  if !EMAIL_RE.is_match(&normalized) {
    out.push(Violation::new("email", "invalid email format", raw));
  }
  if normalized.chars().count() > EMAIL_MAX {
    out.push(Violation::new(
      "email",
      format!("must not exceed {EMAIL_MAX} characters"),
      raw,
    ));
  }
  normalized
}

fn check_phone(raw: &str, out: &mut Vec<Violation>) -> String {
  let trimmed = raw.trim();
  let digits: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
  if !PHONE_RE.is_match(&digits) {
    out.push(Violation::new(
      "telephone",
      "invalid phone format (expected e.g. 01 23 45 67 89)",
      raw,
    ));
  }
  trimmed.to_owned()
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Validate a raw submission, returning the normalized record or every
/// violated rule.
pub fn validate(input: &ContactInput) -> Result<NewContact, Vec<Violation>> {
  let mut violations = Vec::new();

  let nom       = check_name("nom", &input.nom, &mut violations);
  let prenom    = check_name("prenom", &input.prenom, &mut violations);
  let adresse   = check_address(&input.adresse, &mut violations);
  let email     = check_email(&input.email, &mut violations);
  let telephone = check_phone(&input.telephone, &mut violations);

  if !violations.is_empty() {
    return Err(violations);
  }

  Ok(NewContact { nom, prenom, adresse, email, telephone })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
