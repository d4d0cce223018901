//! Handlers resolving a short code to its long URL.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::api::dto::redirect::RedirectResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code and returns the long URL as JSON.
///
/// # Endpoint
///
/// `GET /api/redirect/{short_code}`
///
/// # Click Tracking
///
/// A click event is queued for the background worker and never awaited; a full
/// queue drops the click, and a failed increment never changes this response.
///
/// # Errors
///
/// - 404 Not Found if the short code doesn't exist
/// - 500 Internal Server Error on store failure
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RedirectResponse>, AppError> {
    let long_url = resolve(&state, &short_code).await?;

    Ok(Json(RedirectResponse { long_url }))
}

/// Redirects a browser straight to the long URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Answers `307 Temporary Redirect` so every visit comes back through the service
/// and is counted. Errors as for [`redirect_handler`].
pub async fn browser_redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = resolve(&state, &short_code).await?;

    Ok(Redirect::temporary(&long_url))
}

async fn resolve(state: &AppState, short_code: &str) -> Result<String, AppError> {
    let url = state
        .url_service
        .get_url_by_short_code(short_code)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "shortCode": short_code }))
        })?;

    state.record_click(&url.short_code);

    Ok(url.long_url)
}
