//! JSON HTTP API for the Carnet contact-intake service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`carnet_core::store::ContactStore`]: CRUD under `/api/users`, a liveness
//! probe at `/health`, and the embedded intake form at `/`. TLS, auth and
//! rate limiting are the deployment's responsibility.

pub mod envelope;
pub mod error;
pub mod form;
pub mod health;
pub mod users;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  http::{Method, StatusCode, Uri},
  response::IntoResponse,
  routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use carnet_core::store::ContactStore;

use envelope::Envelope;
pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CARNET_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  /// Anything other than `"production"` exposes internal error detail in
  /// 500 responses.
  pub environment: String,
}

impl ServerConfig {
  pub fn expose_internal_detail(&self) -> bool {
    self.environment != "production"
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ContactStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S: ContactStore> AppState<S> {
  /// Translate a storage failure through the error normalizer.
  pub(crate) fn normalize(&self, err: carnet_core::Error) -> ApiError {
    error::normalize(err, self.config.expose_internal_detail())
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(form::page))
    .route("/health", get(health::handler))
    .route(
      "/api/users",
      get(users::list::<S>).post(users::create::<S>),
    )
    .route(
      "/api/users/{id}",
      get(users::get_one::<S>)
        .put(users::update_one::<S>)
        .delete(users::delete_one::<S>),
    )
    .fallback(not_found)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
  (
    StatusCode::NOT_FOUND,
    Json(Envelope::failure(
      format!("route {method} {} not found", uri.path()),
      "ROUTE_NOT_FOUND",
      None,
    )),
  )
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, header},
  };
  use carnet_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:  Arc::new(store),
      config: Arc::new(ServerConfig {
        host:        "127.0.0.1".to_string(),
        port:        3000,
        store_path:  PathBuf::from(":memory:"),
        environment: "production".to_string(),
      }),
    }
  }

  async fn request(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
  }

  fn wu_li() -> Value {
    json!({
      "nom":       "Li",
      "prenom":    "Wu",
      "adresse":   "12 rue de la Paix, Paris",
      "email":     "wu.li@test.com",
      "telephone": "0102030405",
    })
  }

  // ── Create ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_valid_user_returns_201_with_id() {
    let state = make_state().await;
    let (status, body) =
      request(state, "POST", "/api/users", Some(wu_li())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["email"], json!("wu.li@test.com"));
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"]["date_creation"].is_string());
  }

  #[tokio::test]
  async fn repeated_post_returns_409_duplicate_email() {
    let state = make_state().await;
    request(state.clone(), "POST", "/api/users", Some(wu_li())).await;

    let (status, body) =
      request(state, "POST", "/api/users", Some(wu_li())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("DUPLICATE_EMAIL"));
  }

  #[tokio::test]
  async fn duplicate_detection_is_case_insensitive() {
    let state = make_state().await;
    request(state.clone(), "POST", "/api/users", Some(wu_li())).await;

    let mut upper = wu_li();
    upper["email"] = json!("Wu.Li@Test.Com");
    let (status, body) = request(state, "POST", "/api/users", Some(upper)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("DUPLICATE_EMAIL"));
  }

  #[tokio::test]
  async fn post_invalid_user_returns_400_with_all_violations() {
    let state = make_state().await;
    let (status, body) = request(
      state,
      "POST",
      "/api/users",
      Some(json!({
        "nom":       "J0hn",
        "prenom":    "A",
        "adresse":   "short",
        "email":     "a@b",
        "telephone": "1234567890",
      })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("VALIDATION_FAILED"));
    let errors = body["errors"].as_array().unwrap();
    let fields: Vec<&str> =
      errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    for field in ["nom", "prenom", "adresse", "email", "telephone"] {
      assert!(fields.contains(&field), "missing violation for {field}");
    }
    assert!(errors.iter().all(|e| e["message"].is_string()));
    assert!(errors.iter().all(|e| e["value"].is_string()));
  }

  #[tokio::test]
  async fn post_normalizes_email_to_lowercase() {
    let state = make_state().await;
    let mut input = wu_li();
    input["email"] = json!("Test@Example.com");

    let (status, body) = request(state, "POST", "/api/users", Some(input)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], json!("test@example.com"));
  }

  // ── Read ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_missing_user_returns_404_user_not_found() {
    let state = make_state().await;
    let (status, body) =
      request(state, "GET", "/api/users/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("USER_NOT_FOUND"));
  }

  #[tokio::test]
  async fn list_returns_count_and_newest_first() {
    let state = make_state().await;
    for (nom, email) in [
      ("Premier", "a@test.com"),
      ("Deuxieme", "b@test.com"),
      ("Troisieme", "c@test.com"),
    ] {
      let mut input = wu_li();
      input["email"] = json!(email);
      input["nom"] = json!(nom);
      let (status, body) =
        request(state.clone(), "POST", "/api/users", Some(input)).await;
      assert_eq!(status, StatusCode::CREATED, "seed failed: {body}");
    }

    let (status, body) = request(state, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(3));
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["email"], json!("c@test.com"));
    assert_eq!(data[2]["email"], json!("a@test.com"));
  }

  // ── Update ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_replaces_fields_and_preserves_identity() {
    let state = make_state().await;
    let (_, created) =
      request(state.clone(), "POST", "/api/users", Some(wu_li())).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let mut replacement = wu_li();
    replacement["prenom"] = json!("Wei");
    let (status, body) = request(
      state.clone(),
      "PUT",
      &format!("/api/users/{id}"),
      Some(replacement),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["prenom"], json!("Wei"));
    assert_eq!(body["data"]["id"], json!(id));
    assert_eq!(
      body["data"]["date_creation"],
      created["data"]["date_creation"]
    );
  }

  #[tokio::test]
  async fn put_missing_user_returns_404() {
    let state = make_state().await;
    let (status, body) =
      request(state, "PUT", "/api/users/999999", Some(wu_li())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("USER_NOT_FOUND"));
  }

  #[tokio::test]
  async fn put_taking_another_users_email_returns_409() {
    let state = make_state().await;
    request(state.clone(), "POST", "/api/users", Some(wu_li())).await;

    let mut other = wu_li();
    other["email"] = json!("other@test.com");
    let (_, created) =
      request(state.clone(), "POST", "/api/users", Some(other)).await;
    let id = created["data"]["id"].as_i64().unwrap();

    // Try to steal the first user's email.
    let (status, body) = request(
      state,
      "PUT",
      &format!("/api/users/{id}"),
      Some(wu_li()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("DUPLICATE_EMAIL"));
  }

  #[tokio::test]
  async fn put_keeping_own_email_is_allowed() {
    let state = make_state().await;
    let (_, created) =
      request(state.clone(), "POST", "/api/users", Some(wu_li())).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, _) = request(
      state,
      "PUT",
      &format!("/api/users/{id}"),
      Some(wu_li()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn put_invalid_user_returns_400() {
    let state = make_state().await;
    let (_, created) =
      request(state.clone(), "POST", "/api/users", Some(wu_li())).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let mut bad = wu_li();
    bad["telephone"] = json!("not a phone");
    let (status, body) =
      request(state, "PUT", &format!("/api/users/{id}"), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("VALIDATION_FAILED"));
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_returns_removed_record_then_404() {
    let state = make_state().await;
    let (_, created) =
      request(state.clone(), "POST", "/api/users", Some(wu_li())).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) =
      request(state.clone(), "DELETE", &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("wu.li@test.com"));

    let (status, _) =
      request(state, "GET", &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_missing_user_returns_404() {
    let state = make_state().await;
    let (status, body) =
      request(state, "DELETE", "/api/users/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("USER_NOT_FOUND"));
  }

  // ── Ambient routes ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_returns_200_with_version() {
    let state = make_state().await;
    let (status, body) = request(state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["version"].is_string());
  }

  #[tokio::test]
  async fn form_page_is_served_at_root() {
    let state = make_state().await;
    let resp = router(state)
      .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let html = std::str::from_utf8(&bytes).unwrap();
    assert!(html.contains("<form"), "not a form page");
  }

  #[tokio::test]
  async fn unknown_route_returns_route_not_found_envelope() {
    let state = make_state().await;
    let (status, body) = request(state, "GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("ROUTE_NOT_FOUND"));
  }
}
