//! `GET /health` — liveness probe.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthPayload {
  pub success:   bool,
  pub message:   &'static str,
  pub timestamp: String,
  pub version:   &'static str,
}

pub async fn handler() -> Json<HealthPayload> {
  Json(HealthPayload {
    success:   true,
    message:   "carnet contact service online",
    timestamp: Utc::now().to_rfc3339(),
    version:   env!("CARGO_PKG_VERSION"),
  })
}
