//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer.
//!
//! - [`persistence`] - MongoDB and in-memory repository implementations

pub mod persistence;
