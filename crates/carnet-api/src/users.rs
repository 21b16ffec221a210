//! Handlers for `/api/users` endpoints.
//!
//! | Method   | Path | Success | Failure |
//! |----------|------|---------|---------|
//! | `GET`    | `/api/users` | 200, sequence + count | 500 |
//! | `GET`    | `/api/users/{id}` | 200, record | 404 |
//! | `POST`   | `/api/users` | 201, record | 400, 409, 500 |
//! | `PUT`    | `/api/users/{id}` | 200, record | 400, 404, 409, 500 |
//! | `DELETE` | `/api/users/{id}` | 200, record | 404, 500 |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};

use carnet_core::{Contact, ContactInput, store::ContactStore, validate};

use crate::{AppState, envelope::Envelope, error::ApiError};

/// `GET /api/users`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<Contact>>>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let contacts = state
    .store
    .find_all()
    .await
    .map_err(|e| state.normalize(e))?;
  let count = contacts.len();
  Ok(Json(Envelope::listing(
    "users retrieved",
    contacts,
    count,
  )))
}

/// `GET /api/users/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Envelope<Contact>>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let contact = state
    .store
    .find_by_id(id)
    .await
    .map_err(|e| state.normalize(e))?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(Envelope::data("user retrieved", contact)))
}

/// `POST /api/users`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(input): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let new = validate::validate(&input).map_err(ApiError::Validation)?;

  // Advisory pre-check for a friendly error. The unique index consulted by
  // `create` remains authoritative under concurrent submissions.
  let existing = state
    .store
    .find_by_email(&new.email)
    .await
    .map_err(|e| state.normalize(e))?;
  if existing.is_some() {
    return Err(ApiError::DuplicateEmail);
  }

  let contact = state
    .store
    .create(new)
    .await
    .map_err(|e| state.normalize(e))?;

  tracing::info!(id = contact.id, "user created");
  Ok((
    StatusCode::CREATED,
    Json(Envelope::data("user created", contact)),
  ))
}

/// `PUT /api/users/{id}`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(input): Json<ContactInput>,
) -> Result<Json<Envelope<Contact>>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let new = validate::validate(&input).map_err(ApiError::Validation)?;

  state
    .store
    .find_by_id(id)
    .await
    .map_err(|e| state.normalize(e))?
    .ok_or(ApiError::NotFound)?;

  // The target record itself may keep its email.
  let holder = state
    .store
    .find_by_email(&new.email)
    .await
    .map_err(|e| state.normalize(e))?;
  if holder.is_some_and(|c| c.id != id) {
    return Err(ApiError::DuplicateEmail);
  }

  let contact = state
    .store
    .update(id, new)
    .await
    .map_err(|e| state.normalize(e))?;

  tracing::info!(id, "user updated");
  Ok(Json(Envelope::data("user updated", contact)))
}

/// `DELETE /api/users/{id}`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Envelope<Contact>>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let contact = state
    .store
    .delete(id)
    .await
    .map_err(|e| state.normalize(e))?;

  tracing::info!(id, "user deleted");
  Ok(Json(Envelope::data("user deleted", contact)))
}
