//! HTTP API layer for homebase.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: one module per concept surface
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: token resolution, application state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
