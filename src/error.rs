//! Application error type shared by services, repositories and HTTP handlers.
//!
//! Every failure surfaced by the crate is an [`AppError`]. The variant decides the
//! HTTP status at the API boundary; the message and details travel with it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Serialize;
use serde_json::{Value, json};

/// MongoDB server error code for a duplicate key on a unique index.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// JSON body returned for failed requests.
///
/// ```json
/// { "message": "Alias already in use", "error": "conflict", "details": { "alias": "promo" } }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A record addressed by the caller does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A uniqueness rule would be violated (alias or username already taken).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Short-code generation ran out of attempts.
    #[error("{message}")]
    Capacity { message: String, details: Value },

    /// Connection or query failure in the backing store.
    #[error("{message}")]
    Store { message: String, details: Value },

    /// The store could not be reached, so no command was sent. Safe to retry
    /// even for non-idempotent writes.
    #[error("{message}")]
    Unavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn capacity(message: impl Into<String>, details: Value) -> Self {
        Self::Capacity {
            message: message.into(),
            details,
        }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Capacity { .. } => "capacity_exhausted",
            AppError::Store { .. } => "store_error",
            AppError::Unavailable { .. } => "store_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Capacity { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store { .. } | AppError::Unavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }

    /// True when the failed operation provably never reached the store.
    pub fn is_unsent(&self) -> bool {
        matches!(self, AppError::Unavailable { .. })
    }

    pub fn to_body(&self) -> ErrorBody {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Capacity { message, details }
            | AppError::Store { message, details }
            | AppError::Unavailable { message, details } => (message.clone(), details.clone()),
        };

        ErrorBody {
            message,
            error: self.code(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { message, details } | AppError::Unavailable { message, details } =
            &self
        {
            tracing::error!(%message, %details, "Store failure");
        }

        (self.status(), Json(self.to_body())).into_response()
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = e.kind.as_ref()
            && write_error.code == DUPLICATE_KEY_CODE
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "reason": write_error.message }),
            );
        }

        // No server was selected, so nothing was sent
        if let ErrorKind::ServerSelection { .. } = e.kind.as_ref() {
            return AppError::unavailable(
                "Database unreachable",
                json!({ "reason": e.to_string() }),
            );
        }

        AppError::store("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::bad_request(
            format!("Invalid request: {}", e),
            json!({ "fields": fields }),
        )
    }
}
