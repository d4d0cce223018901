//! Domain layer: entities, repository contracts and click processing.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click event passed from handlers to the worker
//!
//! # Click Processing Flow
//!
//! 1. A handler resolves a short code
//! 2. A [`click_event::ClickEvent`] is offered to a bounded channel (never awaited)
//! 3. [`crate::application::click_worker::run_click_worker`] applies the increment with retry
//! 4. The counter is bumped atomically via [`repositories::UrlRepository::increment_clicks`]

pub mod click_event;
pub mod entities;
pub mod repositories;
