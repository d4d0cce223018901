//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, RecordId, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short URL records.
///
/// Lookups are always by exact short code; the numeric id is exposed for
/// presentation and administration only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MongoUrlRepository`] - MongoDB implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new short URL with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already stored.
    /// Returns [`AppError::Store`] on database errors.
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a record by its exact short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a record by its public identifier.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<ShortUrl>, AppError>;

    /// Returns true if a record with this short code exists.
    async fn code_exists(&self, short_code: &str) -> Result<bool, AppError>;

    /// Returns up to `limit` records, newest `created_at` first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<ShortUrl>, AppError>;

    /// Atomically adds one to the click counter.
    ///
    /// Returns `Ok(false)` when no record matches; that is not an error.
    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError>;

    /// Round-trips to the store to confirm it is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
