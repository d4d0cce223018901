//! Short URL allocation and resolution service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved, validate_custom_alias};

/// Number of records returned by [`UrlService::get_recent_urls`] when the caller
/// does not ask for a specific count.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Generated codes tried before giving up with [`AppError::Capacity`].
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Source of candidate short codes.
pub type CodeGenerator = Box<dyn Fn() -> Result<String, AppError> + Send + Sync>;

/// Allocates short codes, persists mappings and resolves them back.
///
/// Uniqueness of short codes is checked before every write and, for stores with a
/// unique index, enforced again at insert time. A generated code that loses a race
/// at insert time, or that equals a reserved route segment, is treated like any
/// other collision and regenerated.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    generate: CodeGenerator,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service drawing codes from [`generate_code`].
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_code_generator(repository, Box::new(generate_code))
    }

    /// Creates a URL service with a custom code source.
    pub fn with_code_generator(repository: Arc<R>, generate: CodeGenerator) -> Self {
        Self {
            repository,
            generate,
        }
    }

    /// Creates a short URL, using `custom_alias` as the code when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is blank or the alias breaks
    /// the alias rules.
    /// Returns [`AppError::Conflict`] if the alias is already in use; nothing is
    /// written in that case.
    /// Returns [`AppError::Capacity`] if no free code was found within
    /// [`MAX_GENERATION_ATTEMPTS`].
    /// Returns [`AppError::Store`] on database errors.
    pub async fn create_short_url(
        &self,
        long_url: String,
        custom_alias: Option<String>,
    ) -> Result<ShortUrl, AppError> {
        if long_url.trim().is_empty() {
            return Err(AppError::bad_request(
                "Long URL must not be empty",
                json!({ "field": "longUrl" }),
            ));
        }

        match custom_alias {
            Some(alias) => self.create_with_alias(long_url, alias).await,
            None => self.create_with_generated_code(long_url).await,
        }
    }

    /// Looks up a short URL by its exact code.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn get_url_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortUrl>, AppError> {
        self.repository.find_by_code(short_code).await
    }

    /// Adds one click to the record with this code.
    ///
    /// An unknown code is a no-op, not an error.
    pub async fn increment_url_clicks(&self, short_code: &str) -> Result<(), AppError> {
        if !self.repository.increment_clicks(short_code).await? {
            tracing::debug!(short_code, "Click for unknown short code ignored");
        }

        Ok(())
    }

    /// Returns up to `limit` (default [`DEFAULT_RECENT_LIMIT`]) records, newest first.
    pub async fn get_recent_urls(&self, limit: Option<usize>) -> Result<Vec<ShortUrl>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }

        self.repository.list_recent(limit).await
    }

    /// Returns true iff no record currently uses this code.
    pub async fn is_short_code_available(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(!self.repository.code_exists(short_code).await?)
    }

    /// Checks that the backing store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn create_with_alias(&self, long_url: String, alias: String) -> Result<ShortUrl, AppError> {
        validate_custom_alias(&alias)?;

        if !self.is_short_code_available(&alias).await? {
            return Err(alias_in_use(&alias));
        }

        let new_url = NewShortUrl {
            short_code: alias.clone(),
            long_url,
            custom_alias: Some(alias.clone()),
            created_at: Utc::now(),
        };

        let url = self.repository.create(new_url).await.map_err(|e| {
            if e.is_conflict() {
                alias_in_use(&alias)
            } else {
                e
            }
        })?;

        tracing::info!(short_code = %url.short_code, "Short URL created with custom alias");
        Ok(url)
    }

    async fn create_with_generated_code(&self, long_url: String) -> Result<ShortUrl, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = (self.generate)()?;

            if is_reserved(&code) {
                tracing::debug!(attempt, code = %code, "Generated short code is reserved");
                continue;
            }

            if !self.is_short_code_available(&code).await? {
                tracing::debug!(attempt, code = %code, "Generated short code already taken");
                continue;
            }

            let new_url = NewShortUrl {
                short_code: code,
                long_url: long_url.clone(),
                custom_alias: None,
                created_at: Utc::now(),
            };

            match self.repository.create(new_url).await {
                Ok(url) => {
                    tracing::info!(short_code = %url.short_code, attempt, "Short URL created");
                    return Ok(url);
                }
                Err(e) if e.is_conflict() => {
                    tracing::debug!(attempt, "Generated short code taken concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Exhausted short code generation attempts"
        );

        Err(AppError::capacity(
            "Failed to generate unique short code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}

fn alias_in_use(alias: &str) -> AppError {
    AppError::conflict("Alias already in use", json!({ "alias": alias }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RecordId;
    use crate::domain::repositories::MockUrlRepository;
    use crate::utils::code_generator::SHORT_CODE_LENGTH;
    use chrono::Duration;

    fn stored(new_url: NewShortUrl) -> ShortUrl {
        new_url.into_short_url(RecordId::new(1))
    }

    fn create_test_url(id: u128, code: &str, minutes_ago: i64) -> ShortUrl {
        ShortUrl::new(
            RecordId::new(id),
            code.to_string(),
            format!("https://example.com/{}", code),
            None,
            Utc::now() - Duration::minutes(minutes_ago),
            0,
        )
    }

    #[tokio::test]
    async fn test_create_generates_fixed_length_code() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists().times(1).returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_url| {
                new_url.short_code.len() == SHORT_CODE_LENGTH
                    && new_url.custom_alias.is_none()
                    && new_url.long_url == "https://example.com"
            })
            .times(1)
            .returning(|new_url| Ok(stored(new_url)));

        let service = UrlService::new(Arc::new(repo));
        let url = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(url.short_code.len(), SHORT_CODE_LENGTH);
        assert_eq!(url.clicks, 0);
    }

    #[tokio::test]
    async fn test_create_retries_on_taken_code() {
        let mut repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_code_exists()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        repo.expect_code_exists()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        repo.expect_create()
            .times(1)
            .returning(|new_url| Ok(stored(new_url)));

        let service = UrlService::new(Arc::new(repo));
        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_retries_when_insert_races() {
        let mut repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_code_exists().times(2).returning(|_| Ok(false));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_url| Ok(stored(new_url)));

        let service = UrlService::new(Arc::new(repo));
        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_fails_with_capacity_after_max_attempts() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Ok(true));
        repo.expect_create().times(0);

        let service = UrlService::new(Arc::new(repo));
        let err = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Capacity { .. }));
    }

    #[tokio::test]
    async fn test_create_with_custom_alias() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists()
            .withf(|code| code == "promo")
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_url| {
                new_url.short_code == "promo" && new_url.custom_alias.as_deref() == Some("promo")
            })
            .times(1)
            .returning(|new_url| Ok(stored(new_url)));

        let service = UrlService::new(Arc::new(repo));
        let url = service
            .create_short_url(
                "https://example.com/sale".to_string(),
                Some("promo".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(url.short_code, "promo");
        assert!(url.is_custom());
    }

    #[tokio::test]
    async fn test_create_custom_alias_conflict_writes_nothing() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists()
            .withf(|code| code == "promo")
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_create().times(0);

        let service = UrlService::new(Arc::new(repo));
        let err = service
            .create_short_url("https://example.com".to_string(), Some("promo".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Alias already in use");
    }

    #[tokio::test]
    async fn test_create_custom_alias_store_conflict_is_reported_as_alias_conflict() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists().times(1).returning(|_| Ok(false));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let service = UrlService::new(Arc::new(repo));
        let err = service
            .create_short_url("https://example.com".to_string(), Some("promo".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Alias already in use");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_alias() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists().times(0);
        repo.expect_create().times(0);

        let service = UrlService::new(Arc::new(repo));
        let err = service
            .create_short_url("https://example.com".to_string(), Some(String::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_long_url() {
        let repo = MockUrlRepository::new();
        let service = UrlService::new(Arc::new(repo));

        let err = service
            .create_short_url("   ".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_propagates_store_error() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists()
            .times(1)
            .returning(|_| Err(AppError::store("Database error", json!({}))));

        let service = UrlService::new(Arc::new(repo));
        let err = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Store { .. }));
    }

    #[tokio::test]
    async fn test_generated_reserved_code_is_redrawn() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_url| new_url.short_code == "abc123")
            .times(1)
            .returning(|new_url| Ok(stored(new_url)));

        let draws = std::sync::Mutex::new(vec!["abc123", "health"]);
        let service = UrlService::with_code_generator(
            Arc::new(repo),
            Box::new(move || Ok(draws.lock().unwrap().pop().unwrap().to_string())),
        );

        let url = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(url.short_code, "abc123");
    }

    #[tokio::test]
    async fn test_get_url_by_short_code_is_pure_read() {
        let existing = create_test_url(1, "abc123", 5);
        let returned = existing.clone();

        // Only lookups are expected; any write call would fail the mock
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(2)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UrlService::new(Arc::new(repo));
        let first = service.get_url_by_short_code("abc123").await.unwrap();
        let second = service.get_url_by_short_code("abc123").await.unwrap();

        assert_eq!(first, Some(existing));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_url_by_short_code_absent_is_none() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let service = UrlService::new(Arc::new(repo));
        let result = service.get_url_by_short_code("nope").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_increment_unknown_code_is_ok() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(false));

        let service = UrlService::new(Arc::new(repo));
        assert!(service.increment_url_clicks("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_recent_defaults_to_ten() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_recent()
            .withf(|limit| *limit == DEFAULT_RECENT_LIMIT)
            .times(1)
            .returning(|_| Ok(vec![create_test_url(2, "newer", 1), create_test_url(1, "older", 5)]));

        let service = UrlService::new(Arc::new(repo));
        let urls = service.get_recent_urls(None).await.unwrap();

        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0].short_code, "newer");
    }

    #[tokio::test]
    async fn test_recent_zero_skips_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_recent().times(0);

        let service = UrlService::new(Arc::new(repo));
        let urls = service.get_recent_urls(Some(0)).await.unwrap();

        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_is_short_code_available() {
        let mut repo = MockUrlRepository::new();
        repo.expect_code_exists()
            .returning(|code| Ok(code == "taken"));

        let service = UrlService::new(Arc::new(repo));

        assert!(!service.is_short_code_available("taken").await.unwrap());
        assert!(service.is_short_code_available("free").await.unwrap());
    }
}
