//! Handler modules for noteful-api.
//!
//! One module per resource; each maps REST verbs onto repository calls and
//! validates required fields before touching the store.

pub mod folders;
pub mod notes;
pub mod tags;
