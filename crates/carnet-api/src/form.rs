//! `GET /` — the embedded contact-intake form.
//!
//! A single self-contained page: mirrored client-side validation for fast
//! feedback, then a JSON POST to `/api/users`. The server re-validates
//! everything; the page also renders per-field violations returned in the
//! envelope.

use axum::response::Html;

const FORM_PAGE: &str = include_str!("../assets/form.html");

pub async fn page() -> Html<&'static str> {
  Html(FORM_PAGE)
}
