//! API route configuration.

use crate::api::handlers::{recent_urls_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`                - Create a short URL
/// - `GET  /redirect/{short_code}`  - Resolve a short code (JSON)
/// - `GET  /urls/recent`            - Most recently created short URLs
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/redirect/{short_code}", get(redirect_handler))
        .route("/urls/recent", get(recent_urls_handler))
}
