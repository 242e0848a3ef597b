//! Core business logic for homebase.
//!
//! One service per concept: each service owns exactly one repository and
//! enforces that collection's invariants. Cross-concept effects live in
//! [`services::sync::SyncService`] alone.

pub mod services;

pub use services::*;
