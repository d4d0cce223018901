//! Short code generation and custom alias validation.
//!
//! Generated codes are drawn from the URL-safe base64 alphabet
//! (`A-Z a-z 0-9 - _`) using operating-system entropy.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of every generated short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Random bytes drawn per code. 6 bytes encode to 8 base64 characters; the
/// first [`SHORT_CODE_LENGTH`] are kept, each carrying 6 uniform bits.
const CODE_RANDOM_BYTES: usize = 6;

pub const ALIAS_MIN_LENGTH: usize = 3;
pub const ALIAS_MAX_LENGTH: usize = 32;

/// Aliases that would shadow service routes.
const RESERVED_ALIASES: &[&str] = &["api", "health"];

/// True for codes that would be shadowed by a service route (case-insensitive).
pub fn is_reserved(code: &str) -> bool {
    RESERVED_ALIASES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Generates a random short code of [`SHORT_CODE_LENGTH`] URL-safe characters.
///
/// # Errors
///
/// Returns [`AppError::Store`] if the system random number generator fails.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_RANDOM_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::store(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(SHORT_CODE_LENGTH);

    Ok(code)
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, hyphen, underscore
/// - Cannot be a reserved route segment (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated. An empty alias is
/// rejected here rather than treated as absent.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() < ALIAS_MIN_LENGTH || alias.len() > ALIAS_MAX_LENGTH {
        return Err(AppError::bad_request(
            format!(
                "Custom alias must be {}-{} characters",
                ALIAS_MIN_LENGTH, ALIAS_MAX_LENGTH
            ),
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if is_reserved(alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
