//! DTOs for short code resolution.

use serde::Serialize;

/// Resolution result for `GET /api/redirect/{shortCode}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResponse {
    pub long_url: String,
}
