//! Lazily established, shared MongoDB connection.

use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tokio::sync::OnceCell;

use super::documents::{UrlDocument, UserDocument};
use crate::error::AppError;

pub const URLS_COLLECTION: &str = "urls";
pub const USERS_COLLECTION: &str = "users";

/// A single MongoDB connection shared by every repository in the process.
///
/// Nothing connects until the first query. The first caller runs the
/// initialization (client creation plus index setup) inside a [`OnceCell`];
/// callers arriving while it is in flight wait for that same attempt instead of
/// starting their own. A failed attempt leaves the cell empty so the next caller
/// retries.
pub struct StoreConnection {
    uri: String,
    database_name: String,
    database: OnceCell<Database>,
}

impl StoreConnection {
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
            database: OnceCell::new(),
        }
    }

    /// Returns the shared database handle, connecting on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the client cannot be created, and
    /// [`AppError::Store`] if the indexes cannot be ensured.
    pub async fn database(&self) -> Result<&Database, AppError> {
        self.database
            .get_or_try_init(|| async {
                tracing::info!(database = %self.database_name, "Connecting to MongoDB");

                let client = Client::with_uri_str(&self.uri).await.map_err(|e| {
                    AppError::unavailable(
                        "Failed to connect to MongoDB",
                        json!({ "reason": e.to_string() }),
                    )
                })?;

                let database = client.database(&self.database_name);
                ensure_indexes(&database).await?;

                tracing::info!(database = %self.database_name, "MongoDB connection ready");
                Ok(database)
            })
            .await
    }

    pub async fn collection<T>(&self, name: &str) -> Result<Collection<T>, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        Ok(self.database().await?.collection::<T>(name))
    }

    /// Sends a `ping` command to the server.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.database().await?.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Creates the indexes the repositories rely on. Idempotent.
async fn ensure_indexes(database: &Database) -> Result<(), AppError> {
    let urls = database.collection::<UrlDocument>(URLS_COLLECTION);
    urls.create_index(
        IndexModel::builder()
            .keys(doc! { "shortCode": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
    )
    .await?;
    urls.create_index(IndexModel::builder().keys(doc! { "createdAt": -1 }).build())
        .await?;

    let users = database.collection::<UserDocument>(USERS_COLLECTION);
    users
        .create_index(
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

    Ok(())
}
