//! # noteful-core
//!
//! Core types, traits, and abstractions for the noteful API.
//!
//! This crate provides the domain model (folders, tags, notes), the
//! repository trait definitions that `noteful-db` implements, and the
//! shared error taxonomy.

pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
