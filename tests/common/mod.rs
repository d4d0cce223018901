#![allow(dead_code)]

use chrono::{Duration, Utc};
use shorturl::domain::click_event::ClickEvent;
use shorturl::domain::entities::NewShortUrl;
use shorturl::domain::repositories::UrlRepository;
use shorturl::infrastructure::persistence::{InMemoryUrlRepository, InMemoryUserRepository};
use shorturl::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_BASE_URL: &str = "http://localhost:3000";
pub const TEST_RECENT_LIMIT_MAX: usize = 100;

pub fn create_test_state() -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (state, rx, _repo) = create_test_state_with_repository();
    (state, rx)
}

pub fn create_test_state_with_repository() -> (
    AppState,
    mpsc::Receiver<ClickEvent>,
    Arc<InMemoryUrlRepository>,
) {
    let (tx, rx) = mpsc::channel(100);

    let url_repo = Arc::new(InMemoryUrlRepository::new());
    let user_repo = Arc::new(InMemoryUserRepository::new());

    let state = AppState::new(
        url_repo.clone(),
        user_repo,
        tx,
        TEST_BASE_URL,
        TEST_RECENT_LIMIT_MAX,
    );

    (state, rx, url_repo)
}

/// Inserts a record created `minutes_ago` minutes in the past.
pub async fn create_test_url(
    repo: &InMemoryUrlRepository,
    code: &str,
    long_url: &str,
    minutes_ago: i64,
) {
    repo.create(NewShortUrl {
        short_code: code.to_string(),
        long_url: long_url.to_string(),
        custom_alias: None,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    })
    .await
    .unwrap();
}
