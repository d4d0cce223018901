//! Click event model for asynchronous click counting.

use chrono::{DateTime, Utc};

/// A resolved short code waiting to have its click recorded.
///
/// Sent from HTTP handlers to the background worker over a bounded channel so
/// the resolution response never waits on the counter update.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub short_code: String,
    pub resolved_at: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            resolved_at: Utc::now(),
        }
    }
}
