//! # shorturl
//!
//! A small URL shortening service built with Axum and MongoDB.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and repository traits
//! - **Application Layer** ([`application`]) - Short code allocation, resolution,
//!   user registration, click worker
//! - **Infrastructure Layer** ([`infrastructure`]) - MongoDB and in-memory repositories
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Random 6-character codes with bounded collision retry, or custom aliases
//! - Atomic click counters updated off the request path
//! - One lazily established MongoDB connection per process
//!
//! ## Quick Start
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017"
//! cargo run
//!
//! # or without a database
//! STORE_BACKEND=memory cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod routes;
pub mod server;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::{UrlService, UserService};
    pub use crate::domain::entities::{NewShortUrl, NewUser, RecordId, ShortUrl, User};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
