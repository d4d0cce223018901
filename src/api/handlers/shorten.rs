//! Handler for the shorten endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::ShortenRequest;
use crate::api::dto::url::UrlResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_url::public_base_url;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com", "customAlias": "promo" }
/// ```
///
/// # Response
///
/// `201 Created` with the stored record and its `shortUrl`.
///
/// # Errors
///
/// - 400 Bad Request if the body is malformed or fails validation
/// - 409 Conflict if `customAlias` is already in use
/// - 503 Service Unavailable if no free short code could be generated
/// - 500 Internal Server Error on store failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let url = state
        .url_service
        .create_short_url(payload.long_url, payload.custom_alias)
        .await?;

    let base_url = public_base_url(&headers, &state.public_base_url);

    Ok((StatusCode::CREATED, Json(UrlResponse::new(url, &base_url))))
}
