//! MongoDB implementation of the user repository.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use mongodb::Collection;
use std::sync::Arc;

use super::connection::{StoreConnection, USERS_COLLECTION};
use super::documents::{UserDocument, object_id_from_record_id};
use crate::domain::entities::{NewUser, RecordId, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// User storage in the `users` collection.
pub struct MongoUserRepository {
    connection: Arc<StoreConnection>,
}

impl MongoUserRepository {
    pub fn new(connection: Arc<StoreConnection>) -> Self {
        Self { connection }
    }

    async fn users(&self) -> Result<Collection<UserDocument>, AppError> {
        self.connection.collection(USERS_COLLECTION).await
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let document = UserDocument::from_new(ObjectId::new(), new_user);

        self.users().await?.insert_one(&document).await?;

        Ok(document.into())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<User>, AppError> {
        let Some(oid) = object_id_from_record_id(id) else {
            return Ok(None);
        };

        let document = self.users().await?.find_one(doc! { "_id": oid }).await?;

        Ok(document.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let document = self
            .users()
            .await?
            .find_one(doc! { "username": username })
            .await?;

        Ok(document.map(User::from))
    }
}
