//! API error taxonomy and [`axum::response::IntoResponse`] implementation.
//!
//! [`normalize`] is the single place where storage failures are translated
//! into this taxonomy; handlers never match on backend-specific detail.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use carnet_core::Violation;

use crate::envelope::Envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed")]
  Validation(Vec<Violation>),

  #[error("email already in use")]
  DuplicateEmail,

  #[error("user not found")]
  NotFound,

  #[error("storage unavailable")]
  Unavailable,

  /// Catch-all. The detail is only populated outside production mode.
  #[error("internal server error")]
  Internal(Option<String>),
}

/// Map a storage failure to the API taxonomy.
///
/// `expose_detail` controls whether the underlying message of an unmapped
/// failure leaks into the response (non-production mode only).
pub fn normalize(err: carnet_core::Error, expose_detail: bool) -> ApiError {
  use carnet_core::Error;
  match err {
    Error::DuplicateEmail => ApiError::DuplicateEmail,
    Error::NotFound(_) => ApiError::NotFound,
    Error::Unavailable(detail) => {
      tracing::error!(%detail, "storage unavailable");
      ApiError::Unavailable
    }
    Error::Storage(detail) => {
      tracing::error!(%detail, "storage error");
      ApiError::Internal(expose_detail.then_some(detail))
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message, code, violations) = match self {
      ApiError::Validation(violations) => (
        StatusCode::BAD_REQUEST,
        "validation failed".to_owned(),
        "VALIDATION_FAILED",
        Some(violations),
      ),
      ApiError::DuplicateEmail => (
        StatusCode::CONFLICT,
        "this email address is already in use".to_owned(),
        "DUPLICATE_EMAIL",
        None,
      ),
      ApiError::NotFound => (
        StatusCode::NOT_FOUND,
        "user not found".to_owned(),
        "USER_NOT_FOUND",
        None,
      ),
      ApiError::Unavailable => (
        StatusCode::SERVICE_UNAVAILABLE,
        "storage service unavailable".to_owned(),
        "STORAGE_UNAVAILABLE",
        None,
      ),
      ApiError::Internal(detail) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        detail.unwrap_or_else(|| "internal server error".to_owned()),
        "INTERNAL_SERVER_ERROR",
        None,
      ),
    };

    (status, Json(Envelope::failure(message, code, violations)))
      .into_response()
  }
}
