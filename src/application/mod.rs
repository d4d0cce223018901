//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give handlers and the admin CLI a small
//! API that does not know which store is behind it.
//!
//! - [`services::url_service::UrlService`] - Short code allocation and resolution
//! - [`services::user_service::UserService`] - User registration and lookup
//! - [`click_worker`] - Background application of click increments

pub mod click_worker;
pub mod services;
