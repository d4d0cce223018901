//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{UrlService, UserService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{UrlRepository, UserRepository};

/// Short URL service over whichever store was configured.
pub type DynUrlService = UrlService<dyn UrlRepository>;

/// User service over whichever store was configured.
pub type DynUserService = UserService<dyn UserRepository>;

/// Cheaply cloneable handles to the services and the click queue.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<DynUrlService>,
    pub user_service: Arc<DynUserService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Fallback base for `shortUrl` when a request has no `Host` header.
    pub public_base_url: String,
    /// Largest `limit` accepted by the recent URLs endpoint.
    pub recent_limit_max: usize,
}

impl AppState {
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        user_repository: Arc<dyn UserRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        public_base_url: impl Into<String>,
        recent_limit_max: usize,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(url_repository)),
            user_service: Arc::new(UserService::new(user_repository)),
            click_sender,
            public_base_url: public_base_url.into(),
            recent_limit_max,
        }
    }

    /// Queues a click for the background worker without waiting.
    ///
    /// A full or closed queue drops the click; the caller's response is never
    /// affected.
    pub fn record_click(&self, short_code: &str) {
        match self.click_sender.try_send(ClickEvent::new(short_code)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::debug!(short_code = %event.short_code, "Click queue full, click dropped");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::warn!(short_code = %event.short_code, "Click queue closed, click dropped");
            }
        }
    }
}
