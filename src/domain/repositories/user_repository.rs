//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, RecordId, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the store rejects a duplicate username.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}
