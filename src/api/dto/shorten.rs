//! DTOs for the shorten endpoint.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// Compiled regex for custom alias validation.
static CUSTOM_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Request to shorten a URL.
///
/// `customAlias` omitted or `null` means "generate a code". An explicit empty
/// string is a validation error, not a request for a generated code.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to shorten (absolute `http` or `https`).
    #[validate(
        length(min = 1, max = 2048, message = "longUrl must be 1-2048 characters"),
        custom(function = validate_http_url)
    )]
    pub long_url: String,

    /// Optional user-chosen short code.
    #[validate(
        length(min = 3, max = 32, message = "customAlias must be 3-32 characters"),
        regex(
            path = *CUSTOM_ALIAS_REGEX,
            message = "customAlias can only contain letters, digits, hyphens and underscores"
        )
    )]
    pub custom_alias: Option<String>,
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(ValidationError::new("url").with_message("Invalid URL format".into())),
    }
}
