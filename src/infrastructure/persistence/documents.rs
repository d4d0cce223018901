//! BSON document shapes stored in MongoDB and their mapping to domain entities.
//!
//! Store-native [`ObjectId`]s stay inside this module. They are projected into
//! [`RecordId`] by placing the 12 id bytes big-endian in the low 96 bits of a
//! `u128`, which is reversible for every id this gateway hands out.

use bson::DateTime as BsonDateTime;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewShortUrl, NewUser, RecordId, ShortUrl, User};

/// Projects a store-native identifier into the public numeric identifier.
pub fn record_id_from_object_id(oid: &ObjectId) -> RecordId {
    let mut bytes = [0u8; 16];
    bytes[4..].copy_from_slice(&oid.bytes());
    RecordId::new(u128::from_be_bytes(bytes))
}

/// Inverse of [`record_id_from_object_id`].
///
/// Returns `None` for identifiers that no stored document can have.
pub fn object_id_from_record_id(id: RecordId) -> Option<ObjectId> {
    let bytes = id.get().to_be_bytes();
    if bytes[..4] != [0u8; 4] {
        return None;
    }

    let mut oid = [0u8; 12];
    oid.copy_from_slice(&bytes[4..]);
    Some(ObjectId::from_bytes(oid))
}

/// Document in the `urls` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub short_code: String,
    pub long_url: String,
    #[serde(default)]
    pub custom_alias: Option<String>,
    pub created_at: BsonDateTime,
    #[serde(default)]
    pub clicks: i64,
}

impl UrlDocument {
    pub fn from_new(id: ObjectId, new_url: NewShortUrl) -> Self {
        Self {
            id,
            short_code: new_url.short_code,
            long_url: new_url.long_url,
            custom_alias: new_url.custom_alias,
            created_at: BsonDateTime::from_chrono(new_url.created_at),
            clicks: 0,
        }
    }
}

impl From<UrlDocument> for ShortUrl {
    fn from(doc: UrlDocument) -> Self {
        ShortUrl::new(
            record_id_from_object_id(&doc.id),
            doc.short_code,
            doc.long_url,
            doc.custom_alias,
            doc.created_at.to_chrono(),
            u64::try_from(doc.clicks).unwrap_or(0),
        )
    }
}

/// Document in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub password: String,
}

impl UserDocument {
    pub fn from_new(id: ObjectId, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            password: new_user.password,
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: record_id_from_object_id(&doc.id),
            username: doc.username,
            password: doc.password,
        }
    }
}
