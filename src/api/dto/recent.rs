//! Query parameters for the recent URLs listing.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// `?limit=N` for `GET /api/urls/recent`.
///
/// Uses `serde_with` to parse the number from the query string.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<usize>,
}
