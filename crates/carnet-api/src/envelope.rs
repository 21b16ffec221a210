//! The uniform JSON response wrapper shared by every endpoint.

use serde::Serialize;

use carnet_core::Violation;

/// `{ success, message, data?, count?, error?, errors? }`
///
/// Success responses carry `data` (and `count` for listings); failure
/// responses carry a stable machine-readable `error` code and, for
/// validation failures, the per-field `errors` array.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub count:   Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:   Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors:  Option<Vec<Violation>>,
}

impl<T: Serialize> Envelope<T> {
  pub fn data(message: impl Into<String>, data: T) -> Self {
    Self {
      success: true,
      message: message.into(),
      data:    Some(data),
      count:   None,
      error:   None,
      errors:  None,
    }
  }

  /// Listing variant; `count` is always the sequence length.
  pub fn listing(message: impl Into<String>, data: T, count: usize) -> Self {
    Self { count: Some(count), ..Self::data(message, data) }
  }
}

impl Envelope<()> {
  pub fn failure(
    message: impl Into<String>,
    error: &'static str,
    errors: Option<Vec<Violation>>,
  ) -> Self {
    Self {
      success: false,
      message: message.into(),
      data:    None,
      count:   None,
      error:   Some(error),
      errors,
    }
  }
}
