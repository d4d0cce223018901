//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`public_url`] - Public base URL resolution and short URL formatting

pub mod code_generator;
pub mod public_url;
