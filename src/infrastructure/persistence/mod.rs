//! Repository implementations.
//!
//! - [`MongoUrlRepository`] / [`MongoUserRepository`] - MongoDB collections over a
//!   shared, lazily established [`StoreConnection`]
//! - [`InMemoryUrlRepository`] / [`InMemoryUserRepository`] - process-local maps

pub mod connection;
pub mod documents;
pub mod memory;
pub mod mongo_url_repository;
pub mod mongo_user_repository;

pub use connection::StoreConnection;
pub use memory::{InMemoryUrlRepository, InMemoryUserRepository};
pub use mongo_url_repository::MongoUrlRepository;
pub use mongo_user_repository::MongoUserRepository;
