//! Repository trait definitions for the domain layer.
//!
//! Traits define the persistence contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! - [`UrlRepository`] - short URL create, lookup, recent listing, click counter
//! - [`UserRepository`] - user create and lookup

pub mod url_repository;
pub mod user_repository;

pub use url_repository::UrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
