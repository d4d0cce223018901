//! Short URL representation returned by the API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::domain::entities::{RecordId, ShortUrl};
use crate::utils::public_url::short_url;

/// A stored short URL plus its computed public `shortUrl`.
///
/// ```json
/// {
///   "id": 1,
///   "shortCode": "aZ3_k9",
///   "longUrl": "https://example.com",
///   "shortUrl": "https://sho.rt/aZ3_k9",
///   "createdAt": "2024-05-01T12:00:00Z",
///   "clicks": 0
/// }
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: RecordId,
    pub short_code: String,
    pub long_url: String,
    pub short_url: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

impl UrlResponse {
    pub fn new(url: ShortUrl, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &url.short_code),
            id: url.id,
            short_code: url.short_code,
            long_url: url.long_url,
            custom_alias: url.custom_alias,
            created_at: url.created_at,
            clicks: url.clicks,
        }
    }
}
