//! HTTP request handlers for API endpoints.

pub mod health;
pub mod recent;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use recent::recent_urls_handler;
pub use redirect::{browser_redirect_handler, redirect_handler};
pub use shorten::shorten_handler;
