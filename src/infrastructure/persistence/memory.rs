//! In-memory repositories.
//!
//! Process-local implementations of the repository traits, selected with
//! `STORE_BACKEND=memory` and used by the integration tests. Identifiers are
//! assigned from a counter starting at 1. State is lost on restart.

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{NewShortUrl, NewUser, RecordId, ShortUrl, User};
use crate::domain::repositories::{UrlRepository, UserRepository};
use crate::error::AppError;

struct Table<T> {
    next_id: u128,
    rows: BTreeMap<String, T>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

fn lock<T>(mutex: &Mutex<Table<T>>) -> Result<MutexGuard<'_, Table<T>>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::store("In-memory store unavailable", json!({ "reason": "mutex poisoned" })))
}

/// Short URLs keyed by short code.
pub struct InMemoryUrlRepository {
    inner: Mutex<Table<ShortUrl>>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Table::new()),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut table = lock(&self.inner)?;

        if table.rows.contains_key(&new_url.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "shortCode": new_url.short_code }),
            ));
        }

        let id = table.allocate_id();
        let url = new_url.into_short_url(id);
        table.rows.insert(url.short_code.clone(), url.clone());

        Ok(url)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(lock(&self.inner)?.rows.get(short_code).cloned())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<ShortUrl>, AppError> {
        Ok(lock(&self.inner)?
            .rows
            .values()
            .find(|url| url.id == id)
            .cloned())
    }

    async fn code_exists(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(lock(&self.inner)?.rows.contains_key(short_code))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ShortUrl>, AppError> {
        let table = lock(&self.inner)?;

        let mut urls: Vec<ShortUrl> = table.rows.values().cloned().collect();
        urls.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        urls.truncate(limit);

        Ok(urls)
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError> {
        let mut table = lock(&self.inner)?;

        match table.rows.get_mut(short_code) {
            Some(url) => {
                url.clicks += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        lock(&self.inner).map(|_| ())
    }
}

/// Users keyed by username.
pub struct InMemoryUserRepository {
    inner: Mutex<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Table::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut table = lock(&self.inner)?;

        if table.rows.contains_key(&new_user.username) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "username": new_user.username }),
            ));
        }

        let id = table.allocate_id();
        let user = new_user.into_user(id);
        table.rows.insert(user.username.clone(), user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<User>, AppError> {
        Ok(lock(&self.inner)?
            .rows
            .values()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(lock(&self.inner)?.rows.get(username).cloned())
    }
}
