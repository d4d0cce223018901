//! Short URL entity representing a stored code → long URL mapping.

use chrono::{DateTime, Utc};

use super::RecordId;

/// A stored short URL with its click counter.
///
/// `short_code` is unique across all records. `clicks` starts at zero and only
/// grows, one per resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: RecordId,
    pub short_code: String,
    pub long_url: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        id: RecordId,
        short_code: String,
        long_url: String,
        custom_alias: Option<String>,
        created_at: DateTime<Utc>,
        clicks: u64,
    ) -> Self {
        Self {
            id,
            short_code,
            long_url,
            custom_alias,
            created_at,
            clicks,
        }
    }

    /// Returns true if the short code was chosen by the caller.
    pub fn is_custom(&self) -> bool {
        self.custom_alias.is_some()
    }
}

/// Input data for persisting a new short URL.
///
/// The repository assigns the identifier; the counter always starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub short_code: String,
    pub long_url: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewShortUrl {
    /// Builds the stored record once an identifier has been assigned.
    pub fn into_short_url(self, id: RecordId) -> ShortUrl {
        ShortUrl::new(
            id,
            self.short_code,
            self.long_url,
            self.custom_alias,
            self.created_at,
            0,
        )
    }
}
