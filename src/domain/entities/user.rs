//! User entity.

use super::RecordId;

/// A registered user.
///
/// Credentials are stored as given; users are immutable after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password: String,
}

/// Input data for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn into_user(self, id: RecordId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}
