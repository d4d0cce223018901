//! Public base URL resolution from HTTP request headers.

use axum::http::{HeaderMap, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Resolves the scheme and host under which short URLs are served.
///
/// Uses the `Host` header, with the scheme taken from `X-Forwarded-Proto` when a
/// proxy sets it and `http` otherwise. Falls back to `fallback` (the configured
/// `PUBLIC_BASE_URL`) when the request carries no usable `Host` header.
///
/// The result never ends with a slash.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt".parse().unwrap());
/// headers.insert("x-forwarded-proto", "https".parse().unwrap());
///
/// assert_eq!(public_base_url(&headers, "http://localhost:3000"), "https://sho.rt");
/// ```
pub fn public_base_url(headers: &HeaderMap, fallback: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty());

    let Some(host) = host else {
        return fallback.trim_end_matches('/').to_string();
    };

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|p| p.eq_ignore_ascii_case("https") || p.eq_ignore_ascii_case("http"))
        .unwrap_or("http")
        .to_ascii_lowercase();

    format!("{}://{}", scheme, host.trim_end_matches('/'))
}

/// Joins a base URL and a short code into the full short URL.
pub fn short_url(base_url: &str, short_code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_code)
}
