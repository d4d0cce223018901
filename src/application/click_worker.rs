//! Background worker applying click increments.
//!
//! Click recording is best-effort and never fails a resolution response. The
//! `$inc` is not idempotent, so only failures where the store was never reached
//! ([`AppError::is_unsent`]) are retried with exponential backoff; any other
//! failure may already have been applied and is logged and dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::application::services::UrlService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Retries after the first unsent increment.
const MAX_RETRIES: usize = 3;

/// Consumes click events until every sender is dropped.
pub async fn run_click_worker<R>(mut rx: mpsc::Receiver<ClickEvent>, service: Arc<UrlService<R>>)
where
    R: UrlRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        process_click(service.as_ref(), &event).await;
    }

    tracing::info!("Click worker stopped: channel closed");
}

/// Applies one click event at most once, retrying only while the store is unreachable.
pub async fn process_click<R>(service: &UrlService<R>, event: &ClickEvent)
where
    R: UrlRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        move || service.increment_url_clicks(&event.short_code),
        AppError::is_unsent,
    )
    .await;

    if let Err(e) = result {
        tracing::warn!(
            short_code = %event.short_code,
            resolved_at = %event.resolved_at,
            error = %e,
            "Failed to record click"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn service(repo: MockUrlRepository) -> UrlService<MockUrlRepository> {
        UrlService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_process_click_increments_once() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        process_click(&service(repo), &ClickEvent::new("abc123")).await;
    }

    #[tokio::test]
    async fn test_process_click_unknown_code_is_not_retried() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(false));

        process_click(&service(repo), &ClickEvent::new("missing")).await;
    }

    #[tokio::test]
    async fn test_process_click_retries_unreachable_store_then_gives_up() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .times(MAX_RETRIES + 1)
            .returning(|_| Err(AppError::unavailable("Database unreachable", json!({}))));

        process_click(&service(repo), &ClickEvent::new("abc123")).await;
    }

    #[tokio::test]
    async fn test_process_click_recovers_after_unreachable_store() {
        let mut repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_increment_clicks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::unavailable("Database unreachable", json!({}))));
        repo.expect_increment_clicks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        process_click(&service(repo), &ClickEvent::new("abc123")).await;
    }

    #[tokio::test]
    async fn test_process_click_applied_write_with_lost_reply_counts_once() {
        let applied = Arc::new(AtomicU64::new(0));
        let counter = applied.clone();

        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks().returning(move |_| {
            // The server applies the $inc, then the reply is lost
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::store(
                "Database error",
                json!({ "reason": "connection reset" }),
            ))
        });

        process_click(&service(repo), &ClickEvent::new("abc123")).await;

        assert_eq!(applied.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_worker_drains_channel() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .times(2)
            .returning(|_| Ok(true));

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new("one")).await.unwrap();
        tx.send(ClickEvent::new("two")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(service(repo))).await;
    }
}
