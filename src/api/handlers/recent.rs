//! Handler for the recent URLs listing.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::HeaderMap,
};
use serde_json::json;

use crate::api::dto::recent::RecentQuery;
use crate::api::dto::url::UrlResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_url::public_base_url;

/// Lists the most recently created short URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/urls/recent?limit=N`
///
/// `limit` defaults to 10; `0` returns an empty list.
///
/// # Errors
///
/// - 400 Bad Request if `limit` is not a number or exceeds the configured maximum
/// - 500 Internal Server Error on store failure
pub async fn recent_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::bad_request(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    if let Some(limit) = query.limit
        && limit > state.recent_limit_max
    {
        return Err(AppError::bad_request(
            format!("limit must not exceed {}", state.recent_limit_max),
            json!({ "limit": limit, "max": state.recent_limit_max }),
        ));
    }

    let urls = state.url_service.get_recent_urls(query.limit).await?;
    let base_url = public_base_url(&headers, &state.public_base_url);

    Ok(Json(
        urls.into_iter()
            .map(|url| UrlResponse::new(url, &base_url))
            .collect(),
    ))
}
