//! User registration and lookup service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, RecordId, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USERNAME_MAX_LENGTH: usize = 64;

/// Service for registering and looking up users.
///
/// Username uniqueness is checked before the insert. The MongoDB gateway also
/// carries a unique index, so two concurrent registrations of the same name
/// still end with exactly one user.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username or password is empty, or
    /// the username is longer than 64 characters.
    /// Returns [`AppError::Conflict`] if the username is taken.
    pub async fn register(&self, username: String, password: String) -> Result<User, AppError> {
        let username = username.trim().to_string();

        if username.is_empty() || username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(
                format!("Username must be 1-{} characters", USERNAME_MAX_LENGTH),
                json!({ "field": "username" }),
            ));
        }

        if password.is_empty() {
            return Err(AppError::bad_request(
                "Password must not be empty",
                json!({ "field": "password" }),
            ));
        }

        if self
            .repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(username_taken(&username));
        }

        let user = self
            .repository
            .create(NewUser {
                username: username.clone(),
                password,
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    username_taken(&username)
                } else {
                    e
                }
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Looks up a user by public identifier.
    pub async fn get_user(&self, id: RecordId) -> Result<Option<User>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Looks up a user by exact username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.repository.find_by_username(username).await
    }
}

fn username_taken(username: &str) -> AppError {
    AppError::conflict("Username already taken", json!({ "username": username }))
}
