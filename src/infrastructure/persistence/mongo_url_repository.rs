//! MongoDB implementation of the short URL repository.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures_util::TryStreamExt;
use mongodb::Collection;
use std::sync::Arc;

use super::connection::{StoreConnection, URLS_COLLECTION};
use super::documents::{UrlDocument, object_id_from_record_id};
use crate::domain::entities::{NewShortUrl, RecordId, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Short URL storage in the `urls` collection.
///
/// Relies on the unique `shortCode` index created by [`StoreConnection`]; a
/// duplicate insert surfaces as [`AppError::Conflict`].
pub struct MongoUrlRepository {
    connection: Arc<StoreConnection>,
}

impl MongoUrlRepository {
    /// Creates a new repository over the shared connection.
    pub fn new(connection: Arc<StoreConnection>) -> Self {
        Self { connection }
    }

    async fn urls(&self) -> Result<Collection<UrlDocument>, AppError> {
        self.connection.collection(URLS_COLLECTION).await
    }
}

#[async_trait]
impl UrlRepository for MongoUrlRepository {
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let document = UrlDocument::from_new(ObjectId::new(), new_url);

        self.urls().await?.insert_one(&document).await?;

        Ok(document.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let document = self
            .urls()
            .await?
            .find_one(doc! { "shortCode": short_code })
            .await?;

        Ok(document.map(ShortUrl::from))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<ShortUrl>, AppError> {
        let Some(oid) = object_id_from_record_id(id) else {
            return Ok(None);
        };

        let document = self.urls().await?.find_one(doc! { "_id": oid }).await?;

        Ok(document.map(ShortUrl::from))
    }

    async fn code_exists(&self, short_code: &str) -> Result<bool, AppError> {
        let count = self
            .urls()
            .await?
            .count_documents(doc! { "shortCode": short_code })
            .limit(1)
            .await?;

        Ok(count > 0)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ShortUrl>, AppError> {
        // A zero limit means "no limit" to the server
        if limit == 0 {
            return Ok(Vec::new());
        }

        let documents: Vec<UrlDocument> = self
            .urls()
            .await?
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(ShortUrl::from).collect())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError> {
        let result = self
            .urls()
            .await?
            .update_one(
                doc! { "shortCode": short_code },
                doc! { "$inc": { "clicks": 1_i64 } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.connection.ping().await
    }
}
