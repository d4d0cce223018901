//! Core domain entities.
//!
//! Entities are plain data. Each stored entity has a `New*` counterpart used for
//! creation, before the repository has assigned a [`RecordId`].
//!
//! - [`ShortUrl`] / [`NewShortUrl`] - a short code mapped to a long URL
//! - [`User`] / [`NewUser`] - a registered account
//! - [`RecordId`] - public numeric identifier projected from the store

pub mod record_id;
pub mod short_url;
pub mod user;

pub use record_id::RecordId;
pub use short_url::{NewShortUrl, ShortUrl};
pub use user::{NewUser, User};
